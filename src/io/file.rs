use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reads the whole file at `path`. The file is closed on every exit path.
pub fn read_whole_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Err> {
    let path = path.as_ref();
    let read_err = |source| Err::Read { path: path.to_path_buf(), source };

    let mut file = fs::File::open(path).map_err(read_err)?;
    let len = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut data = Vec::with_capacity(len);
    file.read_to_end(&mut data).map_err(read_err)?;
    Ok(data)
}

/// Creates or truncates the file at `path` and writes `data` to it.
pub fn write_whole_file<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), Err> {
    let path = path.as_ref();
    let write_err = |source| Err::Write { path: path.to_path_buf(), source };

    let mut file = fs::File::create(path).map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    file.flush().map_err(write_err)
}

#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}
