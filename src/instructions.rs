use crate::Word;
use num::traits::ToPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};

/// Instruction set of the virtual processor.
///
/// Every instruction occupies one code word. The opcodes up to and including
/// [`ADJ`](#variant.ADJ) are followed by a single inline operand word in the
/// code stream (see [`has_operand`](#method.has_operand)); all others are
/// bare. The binary operators pop their left operand from the stack and take
/// the right operand from the accumulator, leaving the result in the
/// accumulator.
///
/// The declaration order is load-bearing: it fixes the numeric encoding of
/// the code stream, and the operand-carrying group must stay in front.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug, ToPrimitive, FromPrimitive)]
pub enum Opcode {
    /// Load effective address: `a = bp + operand` (operand counts words).
    ///
    /// Resolves a parameter (positive operand) or local (negative operand)
    /// slot of the current stack frame.
    LEA,
    /// Load immediate: `a = operand`.
    ///
    /// Also used for absolute data-segment addresses of globals and interned
    /// strings.
    IMM,
    /// Unconditional jump: `pc = operand`.
    JMP,
    /// Jump to subroutine: push the return address, then `pc = operand`.
    JSR,
    /// Branch if zero: `pc = operand` when `a == 0`.
    BZ,
    /// Branch if not zero: `pc = operand` when `a != 0`.
    BNZ,
    /// Enter subroutine: push `bp`, `bp = sp`, reserve `operand` local words.
    ENT,
    /// Adjust stack: discard `operand` words (pops call arguments).
    ADJ,
    /// Leave subroutine: unwind the frame and return to the pushed address.
    LEV,
    /// Load word: `a = word at address a`.
    LI,
    /// Load character: `a = sign-extended byte at address a`.
    LC,
    /// Store word: pop an address, write `a` there.
    SI,
    /// Store character: pop an address, write the low byte of `a` there;
    /// `a` becomes that byte sign-extended.
    SC,
    /// Push the accumulator onto the stack.
    PSH,
    OR,
    XOR,
    AND,
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
    SHL,
    SHR,
    ADD,
    SUB,
    MUL,
    DIV,
    MOD,
    /// `open(path, flags)` on the host; descriptor or -1 in `a`.
    OPEN,
    /// `read(fd, buf, count)` into VM memory; byte count or -1 in `a`.
    READ,
    /// `close(fd)`; 0 or -1 in `a`.
    CLOS,
    /// `printf(fmt, ...)`. The variadic arity is recovered from the operand
    /// of the following `ADJ` in the code stream.
    PRTF,
    /// `malloc(size)` from the VM heap; address or 0 in `a`.
    MALC,
    /// `free(ptr)`. Accepted and ignored; the heap is reclaimed when the
    /// processor is dropped.
    FREE,
    /// `memset(ptr, value, count)` over VM memory; `ptr` in `a`.
    MSET,
    /// `memcmp(a, b, count)` over VM memory; ordering in `a`.
    MCMP,
    /// Terminate execution; the word on top of the stack is the status.
    EXIT,
}

impl Opcode {
    /// Returns true for the opcodes that carry one inline operand word.
    #[inline]
    pub fn has_operand(self) -> bool {
        self <= Opcode::ADJ
    }

    /// Decodes a code word back into an opcode.
    #[inline]
    pub fn decode(word: Word) -> Option<Opcode> {
        num_traits::FromPrimitive::from_i64(word)
    }
}

#[inline]
pub fn enum_to_word<T: ToPrimitive + Copy>(val: T) -> Word {
    val.to_i64().unwrap()
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);
