//! In-memory release archives and canned transports.

#![allow(dead_code)]

use std::io::{self, Cursor, Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use flate2::Compression;
use flate2::write::GzEncoder;
use selfup::{BoxError, Fetch, Url, fetch_fn};
use zip::write::SimpleFileOptions;

pub struct Entry {
    pub name: String,
    pub mode: u32,
    pub data: Vec<u8>,
    pub dir: bool,
}

pub fn file(name: &str, mode: u32, data: &[u8]) -> Entry {
    Entry {
        name: name.to_string(),
        mode,
        data: data.to_vec(),
        dir: false,
    }
}

pub fn dir(name: &str) -> Entry {
    Entry {
        name: name.to_string(),
        mode: 0o755,
        data: Vec::new(),
        dir: true,
    }
}

/// Entry names go straight into the header so hostile names survive.
pub fn tar_gz(entries: &[Entry]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for entry in entries {
        let mut header = tar::Header::new_gnu();
        let raw = &mut header.as_gnu_mut().unwrap().name;
        raw[..entry.name.len()].copy_from_slice(entry.name.as_bytes());
        header.set_entry_type(if entry.dir {
            tar::EntryType::Directory
        } else {
            tar::EntryType::Regular
        });
        header.set_mode(entry.mode);
        header.set_size(entry.data.len() as u64);
        header.set_cksum();
        builder.append(&header, entry.data.as_slice()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub fn zip(entries: &[Entry]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        let options = SimpleFileOptions::default().unix_permissions(entry.mode);
        if entry.dir {
            writer.add_directory(entry.name.as_str(), options).unwrap();
        } else {
            writer.start_file(entry.name.as_str(), options).unwrap();
            writer.write_all(&entry.data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Serves `body` for every request and records the requested URLs.
pub fn serve(body: Vec<u8>) -> (impl Fetch + 'static, Arc<Mutex<Vec<String>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let fetcher = fetch_fn(move |url: &Url| {
        seen.lock().unwrap().push(url.to_string());
        Ok(Box::new(Cursor::new(body.clone())))
    });
    (fetcher, requests)
}

pub fn unreachable() -> impl Fetch + 'static {
    fetch_fn(|_: &Url| {
        Err(Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused")) as BoxError)
    })
}

struct Reset;

impl Read for Reset {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

/// Sends the first `sent` bytes of `body`, then drops the connection.
pub fn cut_off(body: Vec<u8>, sent: usize) -> impl Fetch + 'static {
    fetch_fn(move |_: &Url| {
        let head = body[..sent.min(body.len())].to_vec();
        Ok(Box::new(Cursor::new(head).chain(Reset)))
    })
}

pub fn read(path: impl AsRef<Path>) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

#[cfg(unix)]
pub fn mode(path: impl AsRef<Path>) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

/// Names in `dir`, sorted.
pub fn listing(dir: impl AsRef<Path>) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
