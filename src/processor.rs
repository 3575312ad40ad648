mod syscall;

use std::error::Error as StdError;
use std::fmt;
use std::fs::File;

use num_traits::FromPrimitive;

use crate::constants::WORD_BYTES;
use crate::{enum_to_word, Memory, Opcode, Program, Word};

/// Faults that abort execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The fetched code word does not encode an opcode.
    UnknownInstruction { word: Word, cycle: u64 },
    /// A load or store fell outside the memory space.
    BadMemoryAccess { address: Word, cycle: u64 },
    /// A jump or return target fell outside the code segment.
    BadJump { target: Word, cycle: u64 },
    /// Integer division or remainder by zero.
    DivisionByZero { cycle: u64 },
    /// The program image cannot be loaded or is internally inconsistent.
    InvalidProgram,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownInstruction { word, cycle } => {
                write!(f, "unknown instruction = {}! cycle = {}", word, cycle)
            }
            Error::BadMemoryAccess { address, cycle } => {
                write!(f, "bad memory access at address {} (cycle {})", address, cycle)
            }
            Error::BadJump { target, cycle } => {
                write!(f, "jump target {} outside code segment (cycle {})", target, cycle)
            }
            Error::DivisionByZero { cycle } => {
                write!(f, "division by zero (cycle {})", cycle)
            }
            Error::InvalidProgram => f.write_str("invalid program image"),
        }
    }
}

impl StdError for Error {}

enum StepResult {
    Running,
    Exit(Word),
}

/// The virtual processor: accumulator `a`, base pointer `bp`, stack pointer
/// `sp` (byte addresses into [`Memory`](struct.Memory.html), stack growing
/// downward) and program counter `pc` (index into the code segment).
pub struct Processor {
    a: Word,
    bp: Word,
    sp: Word,
    pc: usize,
    cycle: u64,
    debug: bool,
    code: Vec<Word>,
    memory: Memory,
    heap: Word,
    files: Vec<Option<File>>,
}

impl Processor {
    /// Constructs a processor with `memory_size` bytes of data/heap/stack
    /// space. With `debug` set, every executed instruction is traced.
    pub fn new(memory_size: usize, debug: bool) -> Processor {
        Processor {
            a: 0,
            bp: 0,
            sp: 0,
            pc: 0,
            cycle: 0,
            debug,
            code: Vec::new(),
            memory: Memory::new(memory_size),
            heap: 0,
            files: Vec::new(),
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Installs a program image and primes the initial frame.
    ///
    /// The data segment is copied to the bottom of memory, the heap cursor is
    /// placed behind it, and `args` are materialized on the heap as the guest
    /// `argv`. The stack is primed so that a return from the entry function
    /// lands on an appended `PSH; EXIT` shim, turning the returned value into
    /// the program status.
    pub fn load(&mut self, program: &Program, args: &[String]) -> Result<(), Error> {
        let data = program.data();
        if program.entry() >= program.code().len() {
            return Err(Error::InvalidProgram);
        }
        if !self.memory.check_range(0, data.len()) {
            return Err(Error::InvalidProgram);
        }
        self.memory
            .borrow_slice_mut(0, data.len())
            .map_err(|_| Error::InvalidProgram)?
            .copy_from_slice(data);

        self.code = program.code().to_vec();
        let shim = self.code.len() as Word;
        self.code.push(enum_to_word(Opcode::PSH));
        self.code.push(enum_to_word(Opcode::EXIT));

        self.heap = ((data.len() + WORD_BYTES - 1) & !(WORD_BYTES - 1)) as Word;
        self.sp = self.memory.length() as Word;
        self.bp = self.sp;

        let argv = self.store_args(args)?;
        self.push(args.len() as Word)?;
        self.push(argv)?;
        self.push(shim)?;

        self.a = 0;
        self.cycle = 0;
        self.pc = program.entry();
        Ok(())
    }

    /// Runs until `EXIT`, returning the program status.
    pub fn run(&mut self) -> Result<Word, Error> {
        loop {
            let word = self.fetch()?;
            let op = match Opcode::from_i64(word) {
                Some(op) => op,
                None => {
                    return Err(Error::UnknownInstruction {
                        word,
                        cycle: self.cycle,
                    })
                }
            };
            if self.debug {
                self.trace(op);
            }
            if let StepResult::Exit(status) = self.step(op)? {
                return Ok(status);
            }
        }
    }

    fn step(&mut self, op: Opcode) -> Result<StepResult, Error> {
        match op {
            Opcode::LEA => {
                let offset = self.operand()?;
                self.a = self
                    .bp
                    .wrapping_add(offset.wrapping_mul(WORD_BYTES as Word));
            }
            Opcode::IMM => self.a = self.operand()?,
            Opcode::JMP => {
                let target = self.operand()?;
                self.jump(target)?;
            }
            Opcode::JSR => {
                let target = self.operand()?;
                let ret = self.pc as Word;
                self.push(ret)?;
                self.jump(target)?;
            }
            Opcode::BZ => {
                let target = self.operand()?;
                if self.a == 0 {
                    self.jump(target)?;
                }
            }
            Opcode::BNZ => {
                let target = self.operand()?;
                if self.a != 0 {
                    self.jump(target)?;
                }
            }
            Opcode::ENT => {
                let locals = self.operand()?;
                self.push(self.bp)?;
                self.bp = self.sp;
                self.sp = self.sp.wrapping_sub(locals.wrapping_mul(WORD_BYTES as Word));
            }
            Opcode::ADJ => {
                let words = self.operand()?;
                self.sp = self.sp.wrapping_add(words.wrapping_mul(WORD_BYTES as Word));
            }
            Opcode::LEV => {
                self.sp = self.bp;
                self.bp = self.pop()?;
                let ret = self.pop()?;
                self.jump(ret)?;
            }
            Opcode::LI => self.a = self.read_word(self.a)?,
            Opcode::LC => self.a = Word::from(self.read_byte(self.a)? as i8),
            Opcode::SI => {
                let address = self.pop()?;
                self.write_word(address, self.a)?;
            }
            Opcode::SC => {
                let address = self.pop()?;
                let byte = self.a as i8;
                self.write_byte(address, byte as u8)?;
                self.a = Word::from(byte);
            }
            Opcode::PSH => self.push(self.a)?,
            Opcode::OR
            | Opcode::XOR
            | Opcode::AND
            | Opcode::EQ
            | Opcode::NE
            | Opcode::LT
            | Opcode::GT
            | Opcode::LE
            | Opcode::GE
            | Opcode::SHL
            | Opcode::SHR
            | Opcode::ADD
            | Opcode::SUB
            | Opcode::MUL
            | Opcode::DIV
            | Opcode::MOD => {
                let b = self.pop()?;
                self.a = self.binary(op, b, self.a)?;
            }
            Opcode::OPEN => self.sys_open()?,
            Opcode::READ => self.sys_read()?,
            Opcode::CLOS => self.sys_clos()?,
            Opcode::PRTF => self.sys_prtf()?,
            Opcode::MALC => self.sys_malc()?,
            Opcode::FREE => self.sys_free()?,
            Opcode::MSET => self.sys_mset()?,
            Opcode::MCMP => self.sys_mcmp()?,
            Opcode::EXIT => {
                let status = self.read_word(self.sp)?;
                println!("exit({}) cycle = {}", status, self.cycle);
                return Ok(StepResult::Exit(status));
            }
        }
        Ok(StepResult::Running)
    }

    fn binary(&self, op: Opcode, b: Word, a: Word) -> Result<Word, Error> {
        Ok(match op {
            Opcode::OR => b | a,
            Opcode::XOR => b ^ a,
            Opcode::AND => b & a,
            Opcode::EQ => Word::from(b == a),
            Opcode::NE => Word::from(b != a),
            Opcode::LT => Word::from(b < a),
            Opcode::GT => Word::from(b > a),
            Opcode::LE => Word::from(b <= a),
            Opcode::GE => Word::from(b >= a),
            Opcode::SHL => b.wrapping_shl(a as u32),
            Opcode::SHR => b.wrapping_shr(a as u32),
            Opcode::ADD => b.wrapping_add(a),
            Opcode::SUB => b.wrapping_sub(a),
            Opcode::MUL => b.wrapping_mul(a),
            Opcode::DIV => {
                if a == 0 {
                    return Err(Error::DivisionByZero { cycle: self.cycle });
                }
                b.wrapping_div(a)
            }
            Opcode::MOD => {
                if a == 0 {
                    return Err(Error::DivisionByZero { cycle: self.cycle });
                }
                b.wrapping_rem(a)
            }
            _ => unreachable!(),
        })
    }

    fn trace(&self, op: Opcode) {
        if op.has_operand() {
            let operand = self.code.get(self.pc).copied().unwrap_or(0);
            println!("{:>6}> {:<4} {}", self.cycle, op.to_string(), operand);
        } else {
            println!("{:>6}> {}", self.cycle, op.to_string());
        }
    }

    fn fetch(&mut self) -> Result<Word, Error> {
        self.cycle += 1;
        self.operand()
    }

    fn operand(&mut self) -> Result<Word, Error> {
        let word = self.code.get(self.pc).copied().ok_or(Error::BadJump {
            target: self.pc as Word,
            cycle: self.cycle,
        })?;
        self.pc += 1;
        Ok(word)
    }

    fn jump(&mut self, target: Word) -> Result<(), Error> {
        if target < 0 || target as usize >= self.code.len() {
            return Err(Error::BadJump {
                target,
                cycle: self.cycle,
            });
        }
        self.pc = target as usize;
        Ok(())
    }

    fn push(&mut self, value: Word) -> Result<(), Error> {
        self.sp = self.sp.wrapping_sub(WORD_BYTES as Word);
        self.write_word(self.sp, value)
    }

    fn pop(&mut self) -> Result<Word, Error> {
        let value = self.read_word(self.sp)?;
        self.sp = self.sp.wrapping_add(WORD_BYTES as Word);
        Ok(value)
    }

    fn read_word(&self, address: Word) -> Result<Word, Error> {
        self.memory.read_word(address).map_err(|_| Error::BadMemoryAccess {
            address,
            cycle: self.cycle,
        })
    }

    fn write_word(&mut self, address: Word, value: Word) -> Result<(), Error> {
        let cycle = self.cycle;
        self.memory
            .write_word(address, value)
            .map_err(|_| Error::BadMemoryAccess { address, cycle })
    }

    fn read_byte(&self, address: Word) -> Result<u8, Error> {
        self.memory.read_byte(address).map_err(|_| Error::BadMemoryAccess {
            address,
            cycle: self.cycle,
        })
    }

    fn write_byte(&mut self, address: Word, value: u8) -> Result<(), Error> {
        let cycle = self.cycle;
        self.memory
            .write_byte(address, value)
            .map_err(|_| Error::BadMemoryAccess { address, cycle })
    }

    fn store_args(&mut self, args: &[String]) -> Result<Word, Error> {
        let mut pointers = Vec::with_capacity(args.len());
        for arg in args {
            let address = self.alloc(arg.len() + 1).ok_or(Error::InvalidProgram)?;
            let slice = self
                .memory
                .borrow_slice_mut(address, arg.len())
                .map_err(|_| Error::InvalidProgram)?;
            slice.copy_from_slice(arg.as_bytes());
            pointers.push(address);
        }
        let argv = self
            .alloc(pointers.len() * WORD_BYTES)
            .ok_or(Error::InvalidProgram)?;
        for (index, pointer) in pointers.iter().enumerate() {
            self.write_word(argv + (index * WORD_BYTES) as Word, *pointer)?;
        }
        Ok(argv)
    }
}
