//! Reading the server log of an instance.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// The last `count` lines of the file at `path`.
///
/// A missing log means the server never started; that yields no lines.
pub fn tail_lines(path: &Path, count: usize) -> io::Result<Vec<String>> {
  let file = match File::open(path) {
    Ok(file) => file,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => return Err(e),
  };

  let mut reader = BufReader::new(file);
  let mut window = VecDeque::with_capacity(count.min(4096));
  let mut buf = Vec::new();
  while count > 0 {
    buf.clear();
    if reader.read_until(b'\n', &mut buf)? == 0 {
      break;
    }
    if window.len() == count {
      window.pop_front();
    }
    // the server writes in its own encoding, which need not be UTF-8
    let line = String::from_utf8_lossy(&buf);
    window.push_back(line.trim_end_matches(['\n', '\r']).to_string());
  }
  Ok(window.into())
}
