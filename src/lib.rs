//! Virtual processor for MC bytecode.
//!
//! The processor is a word-oriented stack machine with a single accumulator.
//! A compiled [`Program`](struct.Program.html) consists of a code segment
//! (opcode and operand words) and an initial data segment image; the
//! [`Processor`](struct.Processor.html) places the data segment at the bottom
//! of a linear byte [`Memory`](struct.Memory.html), grows a heap above it and
//! a stack down from the top, and interprets the code until an `EXIT`
//! instruction yields the program status.

pub mod constants;

mod instructions;
mod memory;
mod processor;
mod program;


pub use crate::instructions::{enum_to_word, Opcode};
pub use crate::memory::Memory;
pub use crate::processor::{Error, Processor};
pub use crate::program::Program;

/// Machine word. Wide enough to hold any in-VM pointer.
pub type Word = i64;

pub type Endian = byteorder::LittleEndian;
