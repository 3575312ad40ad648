use crate::Word;
use std::mem;

pub const WORD_BYTES     : usize = mem::size_of::<Word>();

/// Default size of the combined data/heap/stack space in bytes.
pub const DEFAULT_MEMORY : usize = 256 * 1024;

/// Number of variadic arguments `PRTF` passes through after the format.
pub const MAX_PRTF_ARGS  : usize = 6;

/// Descriptors below this value are never handed out by `OPEN`.
pub const FD_BASE        : Word = 3;
