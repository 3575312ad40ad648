//! One-pass compiler for the [mcvm](../mcvm/index.html) virtual processor.
//!
//! The main function provided by this crate is [`compile`](fn.compile.html),
//! which accepts a source file written in a strict subset of C and produces
//! the executable [`Program`](../mcvm/struct.Program.html) image in a single
//! pass: the parser drives the lexer and appends opcodes to the code segment
//! as it goes, with no syntax tree in between. Branch targets that are not
//! known yet are back-patched through their operand slot.
//!
//! # Language
//!
//! A program is a sequence of global declarations. Lines starting with `#`
//! are discarded (there is no preprocessor), `//` starts a comment.
//!
//! ## Types
//!
//! `char`, `int` and pointers to them (`int *`, `char **`, ...). `int` is
//! one machine word (64 bits). `void` is accepted as a synonym for `char` in
//! return types. There are no records, arrays, floats or type qualifiers;
//! `a[i]` subscripting works on pointer values.
//!
//! ## Declarations
//!
//!  Form | Example
//! ------|--------
//! global variables | `int x, *p; char c;`
//! enumerations     | `enum { A, B = 5, C };`
//! functions        | `int add(int a, int b) { return a + b; }`
//!
//! Function bodies start with their local declarations (no initializers),
//! then statements. Forward declarations and separate compilation do not
//! exist; `main` must be defined somewhere in the file.
//!
//! ## Statements
//!
//! `if`/`else`, `while`, `return`, blocks, the empty statement and
//! expression statements. There is no `for`, `switch`, `break`, `continue`
//! or `goto`.
//!
//! ## Expressions
//!
//! Operators in ascending precedence; assignment binds right, the rest bind
//! left:
//!
//!  Level | Operators
//! -------|----------
//!  1 | `=`
//!  2 | `?:`
//!  3 | `||`
//!  4 | `&&`
//!  5 | `|`
//!  6 | `^`
//!  7 | `&`
//!  8 | `==` `!=`
//!  9 | `<` `>` `<=` `>=`
//! 10 | `<<` `>>`
//! 11 | `+` `-`
//! 12 | `*` `/` `%`
//! 13 | `++` `--` (pre and post), unary `!` `~` `+` `-` `*` `&`, casts, `sizeof`, `a[i]`, calls
//!
//! Pointer arithmetic scales by the word size except on `char *`, which
//! steps by bytes. String literals are interned into the data segment;
//! `'\n'` is the only translated escape, any other `\x` passes `x` through.
//!
//! ## Built-in functions
//!
//! `open read close printf malloc free memset memcmp exit` compile to
//! dedicated processor opcodes and bridge to the host at run time.

mod error;
mod expr;
mod lexer;
mod parser;
mod symbol;
mod token;
mod types;


pub use crate::error::{Error, ErrorKind};

use crate::parser::Compiler;
use mcvm::Program;

/// Compiles `source` into a program image.
///
/// With `src_trace` set, every finished source line is echoed together with
/// the bytecode emitted for it.
pub fn compile(source: &str, src_trace: bool) -> Result<Program, Error> {
    let mut compiler = Compiler::new(src_trace);
    compiler.seed();
    compiler.set_source(source);
    compiler.parse()?;
    compiler.finish()
}
