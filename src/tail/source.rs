use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::config::Decoding;
use crate::error::{DirewatchError, Result};

/// Producer of log lines
///
/// `Ok(None)` means no complete line is available right now. It is not an end
/// of stream; the caller decides whether to wait and ask again.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Follows a growing file from its end
///
/// Content present when the file is opened is skipped, including the tail of
/// a line that was still being written at that moment. A trailing fragment
/// without a newline is kept back until the rest of the line arrives.
pub struct FileTailer {
    reader: BufReader<File>,
    path: PathBuf,
    decoding: Decoding,
    pending: Vec<u8>,
    position: u64,
    discard_first: bool,
}

impl FileTailer {
    pub fn open<P: AsRef<Path>>(path: P, decoding: Decoding) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path).map_err(|source| DirewatchError::LogOpen {
            path: path.clone(),
            source,
        })?;
        let position = file.seek(SeekFrom::End(0))?;
        let discard_first = position > 0 && !ends_with_newline(&mut file)?;

        if discard_first {
            log::info!(
                "Following {} from byte {}, skipping the unfinished line",
                path.display(),
                position
            );
        } else {
            log::info!("Following {} from byte {}", path.display(), position);
        }
        Ok(Self {
            reader: BufReader::new(file),
            path,
            decoding,
            pending: Vec::new(),
            position,
            discard_first,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes consumed so far, including any held-back partial line
    pub fn position(&self) -> u64 {
        self.position
    }

    fn decode(&self, bytes: Vec<u8>, line_start: u64) -> Result<String> {
        match self.decoding {
            Decoding::Strict => {
                String::from_utf8(bytes).map_err(|_| DirewatchError::InvalidUtf8 {
                    offset: line_start,
                })
            }
            Decoding::Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

/// Reads the last byte of `file` and leaves the cursor at the end
fn ends_with_newline(file: &mut File) -> Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl LineSource for FileTailer {
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let read = self.reader.read_until(b'\n', &mut self.pending)?;
            self.position += read as u64;

            if !self.pending.ends_with(b"\n") {
                if read > 0 {
                    log::trace!("Holding {} bytes of partial line", self.pending.len());
                }
                return Ok(None);
            }

            let bytes = std::mem::take(&mut self.pending);
            if self.discard_first {
                self.discard_first = false;
                log::debug!("Dropped {} bytes finishing a line from before startup", bytes.len());
                continue;
            }

            let line_start = self.position - bytes.len() as u64;
            return self.decode(bytes, line_start).map(Some);
        }
    }
}

/// Pre-staged lines, handed out one per call until exhausted
impl LineSource for VecDeque<String> {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn log_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    fn append(file: &mut tempfile::NamedTempFile, content: &[u8]) {
        file.as_file_mut().write_all(content).unwrap();
        file.as_file_mut().flush().unwrap();
    }

    #[test]
    fn test_existing_content_is_skipped() {
        let file = log_with(b"old line 1\nold line 2\n");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();
        assert_eq!(tailer.position(), 22);
        assert_eq!(tailer.next_line().unwrap(), None);
    }

    #[test]
    fn test_appended_lines_are_returned_in_order() {
        let mut file = log_with(b"old\n");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();

        append(&mut file, b"first\nsecond\n");
        assert_eq!(tailer.next_line().unwrap().as_deref(), Some("first\n"));
        assert_eq!(tailer.next_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(tailer.next_line().unwrap(), None);

        append(&mut file, b"third\n");
        assert_eq!(tailer.next_line().unwrap().as_deref(), Some("third\n"));
    }

    #[test]
    fn test_partial_line_waits_for_newline() {
        let mut file = log_with(b"");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();

        append(&mut file, b"0,1,2,N0C");
        assert_eq!(tailer.next_line().unwrap(), None);
        append(&mut file, b"ALL,WIDE1-1\n");
        assert_eq!(
            tailer.next_line().unwrap().as_deref(),
            Some("0,1,2,N0CALL,WIDE1-1\n")
        );
        assert_eq!(tailer.position(), 21);
    }

    #[test]
    fn test_unfinished_line_at_startup_is_dropped() {
        let mut file = log_with(b"0,1,2,OLD1,WIDE2-1\n0,1,2,OLD2,WI");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();
        assert_eq!(tailer.next_line().unwrap(), None);

        append(&mut file, b"DE2-1,70,0\n0,1,2,N0CALL\n");
        assert_eq!(
            tailer.next_line().unwrap().as_deref(),
            Some("0,1,2,N0CALL\n")
        );
        assert_eq!(tailer.next_line().unwrap(), None);
    }

    #[test]
    fn test_unfinished_line_dropped_even_when_completed_later() {
        let mut file = log_with(b"0,1,2,OLD2,WI");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();

        append(&mut file, b"DE2");
        assert_eq!(tailer.next_line().unwrap(), None);
        append(&mut file, b"-1\n");
        assert_eq!(tailer.next_line().unwrap(), None);

        append(&mut file, b"new\n");
        assert_eq!(tailer.next_line().unwrap().as_deref(), Some("new\n"));
    }

    #[test]
    fn test_strict_decoding_rejects_invalid_utf8() {
        let mut file = log_with(b"ok\n");
        let mut tailer = FileTailer::open(file.path(), Decoding::Strict).unwrap();

        append(&mut file, b"bad \xff byte\n");
        assert!(matches!(
            tailer.next_line(),
            Err(DirewatchError::InvalidUtf8 { offset: 3 })
        ));
    }

    #[test]
    fn test_lossy_decoding_substitutes() {
        let mut file = log_with(b"");
        let mut tailer = FileTailer::open(file.path(), Decoding::Lossy).unwrap();

        append(&mut file, b"bad \xff byte\n");
        assert_eq!(
            tailer.next_line().unwrap().as_deref(),
            Some("bad \u{FFFD} byte\n")
        );
    }

    #[test]
    fn test_missing_file_is_an_open_error() {
        assert!(matches!(
            FileTailer::open("/nonexistent/direwolf.log", Decoding::Strict),
            Err(DirewatchError::LogOpen { .. })
        ));
    }
}
