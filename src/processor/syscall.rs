//! Host bridges: the system-call opcodes the compiler exposes as built-in
//! functions. Arguments are read from the stack in push order (the deepest
//! word is the first formal parameter).

use std::fs::File;
use std::io::Read;

use super::{Error, Processor};
use crate::constants::{FD_BASE, MAX_PRTF_ARGS, WORD_BYTES};
use crate::Word;

impl Processor {
    pub(super) fn sys_open(&mut self) -> Result<(), Error> {
        let path = self.stack_arg(1)?;
        let _flags = self.stack_arg(0)?;
        let path = match self.memory.read_cstr(path) {
            Ok(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Err(_) => {
                return Err(Error::BadMemoryAccess {
                    address: path,
                    cycle: self.cycle,
                })
            }
        };
        self.a = match File::open(&path) {
            Ok(file) => {
                let slot = match self.files.iter().position(|f| f.is_none()) {
                    Some(slot) => slot,
                    None => {
                        self.files.push(None);
                        self.files.len() - 1
                    }
                };
                self.files[slot] = Some(file);
                slot as Word + FD_BASE
            }
            Err(_) => -1,
        };
        Ok(())
    }

    pub(super) fn sys_read(&mut self) -> Result<(), Error> {
        let fd = self.stack_arg(2)?;
        let buffer = self.stack_arg(1)?;
        let count = self.stack_arg(0)?;
        self.a = -1;
        if count < 0 {
            return Ok(());
        }
        let slot = fd - FD_BASE;
        if slot < 0 || slot as usize >= self.files.len() {
            return Ok(());
        }
        if let Some(file) = self.files[slot as usize].as_mut() {
            if let Ok(slice) = self.memory.borrow_slice_mut(buffer, count as usize) {
                if let Ok(read) = file.read(slice) {
                    self.a = read as Word;
                }
            }
        }
        Ok(())
    }

    pub(super) fn sys_clos(&mut self) -> Result<(), Error> {
        let fd = self.stack_arg(0)?;
        let slot = fd - FD_BASE;
        self.a = if slot >= 0
            && (slot as usize) < self.files.len()
            && self.files[slot as usize].take().is_some()
        {
            0
        } else {
            -1
        };
        Ok(())
    }

    pub(super) fn sys_prtf(&mut self) -> Result<(), Error> {
        // The call site is followed by `ADJ n`; its operand is the arity.
        let argc = self
            .code
            .get(self.pc + 1)
            .copied()
            .ok_or(Error::InvalidProgram)?;
        if argc < 1 || argc > 1024 {
            return Err(Error::InvalidProgram);
        }
        let argc = argc as usize;
        let top = self.sp + (argc * WORD_BYTES) as Word;
        let format = self.read_word(top - WORD_BYTES as Word)?;
        let mut args = Vec::new();
        for index in 2..=argc.min(1 + MAX_PRTF_ARGS) {
            args.push(self.read_word(top - (index * WORD_BYTES) as Word)?);
        }
        let out = self.format(format, &args)?;
        print!("{}", out);
        self.a = out.len() as Word;
        Ok(())
    }

    pub(super) fn sys_malc(&mut self) -> Result<(), Error> {
        let size = self.stack_arg(0)?;
        self.a = if size < 0 {
            0
        } else {
            self.alloc(size as usize).unwrap_or(0)
        };
        Ok(())
    }

    pub(super) fn sys_free(&mut self) -> Result<(), Error> {
        let _ptr = self.stack_arg(0)?;
        Ok(())
    }

    pub(super) fn sys_mset(&mut self) -> Result<(), Error> {
        let pointer = self.stack_arg(2)?;
        let value = self.stack_arg(1)?;
        let count = self.stack_arg(0)?;
        let cycle = self.cycle;
        if count < 0 {
            return Err(Error::BadMemoryAccess {
                address: pointer,
                cycle,
            });
        }
        let slice = self
            .memory
            .borrow_slice_mut(pointer, count as usize)
            .map_err(|_| Error::BadMemoryAccess {
                address: pointer,
                cycle,
            })?;
        for byte in slice.iter_mut() {
            *byte = value as u8;
        }
        self.a = pointer;
        Ok(())
    }

    pub(super) fn sys_mcmp(&mut self) -> Result<(), Error> {
        let left = self.stack_arg(2)?;
        let right = self.stack_arg(1)?;
        let count = self.stack_arg(0)?;
        if count < 0 {
            return Err(Error::BadMemoryAccess {
                address: left,
                cycle: self.cycle,
            });
        }
        let x = self
            .memory
            .borrow_slice(left, count as usize)
            .map_err(|_| Error::BadMemoryAccess {
                address: left,
                cycle: self.cycle,
            })?;
        let y = self
            .memory
            .borrow_slice(right, count as usize)
            .map_err(|_| Error::BadMemoryAccess {
                address: right,
                cycle: self.cycle,
            })?;
        self.a = x
            .iter()
            .zip(y.iter())
            .find(|(a, b)| a != b)
            .map(|(a, b)| Word::from(*a) - Word::from(*b))
            .unwrap_or(0);
        Ok(())
    }

    /// Bump-allocates `size` bytes from the heap, word aligned. Fails when
    /// the heap would collide with the stack pointer.
    pub(super) fn alloc(&mut self, size: usize) -> Option<Word> {
        let aligned = (size + WORD_BYTES - 1) & !(WORD_BYTES - 1);
        let address = self.heap;
        let end = address.checked_add(aligned as Word)?;
        if end > self.sp {
            return None;
        }
        self.heap = end;
        Some(address)
    }

    fn stack_arg(&self, index: usize) -> Result<Word, Error> {
        self.read_word(self.sp + (index * WORD_BYTES) as Word)
    }

    fn format(&self, format: Word, args: &[Word]) -> Result<String, Error> {
        let bytes = self
            .memory
            .read_cstr(format)
            .map_err(|_| Error::BadMemoryAccess {
                address: format,
                cycle: self.cycle,
            })?;
        let mut out = String::new();
        let mut next = 0;
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            i += 1;
            if byte != b'%' {
                out.push(byte as char);
                continue;
            }
            let spec = match bytes.get(i) {
                Some(&spec) => spec,
                None => {
                    out.push('%');
                    break;
                }
            };
            i += 1;
            match spec {
                b'd' => out.push_str(&next_arg(args, &mut next).to_string()),
                b'x' => out.push_str(&format!("{:x}", next_arg(args, &mut next))),
                b'c' => out.push(next_arg(args, &mut next) as u8 as char),
                b's' => {
                    let address = next_arg(args, &mut next);
                    self.push_str_arg(&mut out, address, None)?;
                }
                b'.' if bytes.get(i) == Some(&b'*') && bytes.get(i + 1) == Some(&b's') => {
                    i += 2;
                    let width = next_arg(args, &mut next);
                    let width = if width < 0 { 0 } else { width as usize };
                    let address = next_arg(args, &mut next);
                    self.push_str_arg(&mut out, address, Some(width))?;
                }
                b'%' => out.push('%'),
                other => {
                    out.push('%');
                    out.push(other as char);
                }
            }
        }
        Ok(out)
    }

    fn push_str_arg(&self, out: &mut String, address: Word, width: Option<usize>) -> Result<(), Error> {
        let bytes = self
            .memory
            .read_cstr(address)
            .map_err(|_| Error::BadMemoryAccess {
                address,
                cycle: self.cycle,
            })?;
        let bytes = match width {
            Some(width) if width < bytes.len() => &bytes[..width],
            _ => bytes,
        };
        for &byte in bytes {
            out.push(byte as char);
        }
        Ok(())
    }
}

fn next_arg(args: &[Word], index: &mut usize) -> Word {
    let value = args.get(*index).copied().unwrap_or(0);
    *index += 1;
    value
}
