//! Input/output selection for the CLI.
//!
//! No infile: stdin to stdout. Infile only: file to stdout. Both: file to file.
//! The input is opened first; the output file is only created once the input
//! is known to be readable.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use ftable_core::FtableError;
use tracing::debug;

/// Opened input and output. Dropping it closes both.
pub struct Streams {
    pub input: Box<dyn Read>,
    pub output: Box<dyn Write>,
}

pub fn open_streams(infile: Option<&Path>, outfile: Option<&Path>) -> Result<Streams, FtableError> {
    let Some(infile) = infile else {
        debug!("Reading stdin, writing stdout");
        return Ok(Streams {
            input: Box::new(io::stdin().lock()),
            output: Box::new(BufWriter::new(io::stdout().lock())),
        });
    };

    let input = File::open(infile).map_err(|source| FtableError::OpenInput {
        path: infile.to_path_buf(),
        source,
    })?;
    // A directory opens fine on Unix and only fails on the first read
    let is_dir = input
        .metadata()
        .map_err(|source| FtableError::OpenInput {
            path: infile.to_path_buf(),
            source,
        })?
        .is_dir();
    if is_dir {
        return Err(FtableError::OpenInput {
            path: infile.to_path_buf(),
            source: io::Error::other("is a directory"),
        });
    }
    debug!(path = %infile.display(), "Opened input file");

    let output: Box<dyn Write> = match outfile {
        Some(outfile) => {
            let file = File::create(outfile).map_err(|source| FtableError::OpenOutput {
                path: outfile.to_path_buf(),
                source,
            })?;
            debug!(path = %outfile.display(), "Opened output file");
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    Ok(Streams {
        input: Box::new(input),
        output,
    })
}
