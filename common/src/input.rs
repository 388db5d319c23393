use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Streams the lines of `path` into `f`.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&str),
{
    let file = File::open(path).with_context(|| format!("open input {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut after_cr = false;
    loop {
        let chunk = reader
            .fill_buf()
            .with_context(|| format!("read input {}", path.display()))?;
        if chunk.is_empty() {
            break;
        }
        for &byte in chunk {
            match byte {
                // second half of a `\r\n` pair
                b'\n' if after_cr => after_cr = false,
                b'\r' | b'\n' => {
                    f(String::from_utf8_lossy(&buf).as_ref());
                    buf.clear();
                    after_cr = byte == b'\r';
                }
                _ => {
                    buf.push(byte);
                    after_cr = false;
                }
            }
        }
        let len = chunk.len();
        reader.consume(len);
    }
    if !buf.is_empty() {
        f(String::from_utf8_lossy(&buf).as_ref());
    }
    Ok(())
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut lines = vec![];
    for_each_line(path, |line| lines.push(line.to_string()))?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    fn scratch(contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wc-input-{}", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_lines() {
        let path = scratch(b"first line\r\nsecond\n\nlast without newline");
        let lines = read_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec!["first line", "second", "", "last without newline"]
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_mixed_line_endings() {
        let path = scratch(b"Hello\rWorld\r\nx");
        assert_eq!(read_lines(&path).unwrap(), vec!["Hello", "World", "x"]);
        fs::remove_file(path).unwrap();

        let path = scratch(b"a\r\rb\n\r\nc\r");
        assert_eq!(read_lines(&path).unwrap(), vec!["a", "", "b", "", "c"]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let path = scratch(b"ab\xffcd\n");
        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["ab\u{fffd}cd"]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_input() {
        let path = std::env::temp_dir().join(format!("wc-missing-{}", uuid::Uuid::new_v4()));
        let err = read_lines(&path).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn test_empty_file() {
        let path = scratch(b"");
        assert!(read_lines(&path).unwrap().is_empty());
        fs::remove_file(path).unwrap();
    }
}
