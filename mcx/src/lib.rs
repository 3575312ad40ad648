//! Driver for the MC toolchain: reads a source file, compiles it with
//! [mcc](../mcc/index.html) and executes the image on the
//! [mcvm](../mcvm/index.html) processor.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use mcvm::constants::DEFAULT_MEMORY;
use mcvm::{Processor, Word};


#[derive(Debug)]
pub enum Error {
    Io(std::io::Error, PathBuf),
    SourceTooLarge { size: usize, limit: usize },
    Compile(mcc::Error),
    Vm(mcvm::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err, path) => {
                write!(f, "could not read \"{}\": {}", path.display(), err)
            }
            Error::SourceTooLarge { size, limit } => {
                write!(f, "source of {} bytes exceeds the {} byte pool", size, limit)
            }
            Error::Compile(err) => write!(f, "{}", err),
            Error::Vm(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {}

impl From<mcc::Error> for Error {
    fn from(err: mcc::Error) -> Error {
        Error::Compile(err)
    }
}

impl From<mcvm::Error> for Error {
    fn from(err: mcvm::Error) -> Error {
        Error::Vm(err)
    }
}

pub struct Options {
    /// Echo source and bytecode instead of executing.
    pub src_trace: bool,
    /// Trace every executed instruction.
    pub debug: bool,
    /// Size of the processor's data/heap/stack space in bytes.
    pub memory: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            src_trace: false,
            debug: false,
            memory: DEFAULT_MEMORY,
        }
    }
}

/// Compiles and runs a source string, returning the guest's exit status.
/// Returns `None` in source-trace mode, which stops after compilation.
pub fn run_source(
    source: &str,
    args: &[String],
    options: &Options,
) -> Result<Option<Word>, Error> {
    let program = mcc::compile(source, options.src_trace)?;
    if options.src_trace {
        return Ok(None);
    }
    let mut processor = Processor::new(options.memory, options.debug);
    processor.load(&program, args)?;
    Ok(Some(processor.run()?))
}

/// [`run_source`](fn.run_source.html) over a file. The source must fit the
/// configured pool size.
pub fn run_file<P: AsRef<Path>>(
    path: P,
    args: &[String],
    options: &Options,
) -> Result<Option<Word>, Error> {
    let path = path.as_ref();
    let source =
        fs::read_to_string(path).map_err(|err| Error::Io(err, path.to_owned()))?;
    if source.len() > options.memory {
        return Err(Error::SourceTooLarge {
            size: source.len(),
            limit: options.memory,
        });
    }
    run_source(&source, args, options)
}
