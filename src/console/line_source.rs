use std::io::{self, BufRead, BufReader, Stdin};

/// One line of input at a time; `Ok(None)` means the stream ended.
pub trait LineSource: Send {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Line source over any buffered reader. Strips `\n` and `\r\n` terminators.
pub struct ReaderLineSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead + Send> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead + Send> LineSource for ReaderLineSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }
        // bytes that are not UTF-8 become U+FFFD; only real read errors are fatal
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

pub type StdinLineSource = ReaderLineSource<BufReader<Stdin>>;

impl StdinLineSource {
    /// Only the input thread should own this; nothing else reads stdin.
    pub fn stdin() -> Self {
        ReaderLineSource::new(BufReader::new(io::stdin()))
    }
}
