use mcvm::constants::WORD_BYTES;
use mcvm::{enum_to_word, Opcode, Word};

use crate::error::{Error, ErrorKind};
use crate::parser::Compiler;
use crate::symbol::Class;
use crate::token::Token;
use crate::types::Type;

impl Compiler {
    /// Precedence-climbing expression emitter. `level` is the weakest
    /// operator token that may be consumed; the type of the compiled
    /// expression is left in the `ty` register.
    pub(crate) fn expr(&mut self, level: Token) -> Result<(), Error> {
        self.prefix()?;

        while self.tok >= level {
            let lhs = self.ty;
            match self.tok {
                Token::Assign => {
                    self.next();
                    // rewrite the lvalue's trailing load into an address push
                    match self.last_is_load() {
                        Some(_) => {
                            let last = self.code.len() - 1;
                            self.code[last] = enum_to_word(Opcode::PSH);
                        }
                        None => return Err(self.error(ErrorKind::BadLvalueInAssignment)),
                    }
                    self.expr(Token::Assign)?;
                    self.ty = lhs;
                    self.store_value();
                }
                Token::Cond => {
                    self.next();
                    self.emit_op(Opcode::BZ);
                    let branch = self.emit(0);
                    self.expr(Token::Assign)?;
                    if self.tok != Token::Colon {
                        return Err(self.error(ErrorKind::ConditionalMissingColon));
                    }
                    self.next();
                    self.patch(branch, self.here() + 2);
                    self.emit_op(Opcode::JMP);
                    let jump = self.emit(0);
                    self.expr(Token::Cond)?;
                    self.patch(jump, self.here());
                }
                Token::Lor => {
                    self.next();
                    self.emit_op(Opcode::BNZ);
                    let branch = self.emit(0);
                    self.expr(Token::Lan)?;
                    self.patch(branch, self.here());
                    self.ty = Type::INT;
                }
                Token::Lan => {
                    self.next();
                    self.emit_op(Opcode::BZ);
                    let branch = self.emit(0);
                    self.expr(Token::Or)?;
                    self.patch(branch, self.here());
                    self.ty = Type::INT;
                }
                Token::Or => self.simple_binary(Token::Xor, Opcode::OR)?,
                Token::Xor => self.simple_binary(Token::And, Opcode::XOR)?,
                Token::And => self.simple_binary(Token::Eq, Opcode::AND)?,
                Token::Eq => self.simple_binary(Token::Lt, Opcode::EQ)?,
                Token::Ne => self.simple_binary(Token::Lt, Opcode::NE)?,
                Token::Lt => self.simple_binary(Token::Shl, Opcode::LT)?,
                Token::Gt => self.simple_binary(Token::Shl, Opcode::GT)?,
                Token::Le => self.simple_binary(Token::Shl, Opcode::LE)?,
                Token::Ge => self.simple_binary(Token::Shl, Opcode::GE)?,
                Token::Shl => self.simple_binary(Token::Add, Opcode::SHL)?,
                Token::Shr => self.simple_binary(Token::Add, Opcode::SHR)?,
                Token::Add => {
                    self.next();
                    self.emit_op(Opcode::PSH);
                    self.expr(Token::Mul)?;
                    self.ty = lhs;
                    if self.ty.scales_by_word() {
                        // pointer arithmetic: scale the index by the word size
                        self.emit_op(Opcode::PSH);
                        self.emit_op(Opcode::IMM);
                        self.emit(WORD_BYTES as Word);
                        self.emit_op(Opcode::MUL);
                    }
                    self.emit_op(Opcode::ADD);
                }
                Token::Sub => {
                    self.next();
                    self.emit_op(Opcode::PSH);
                    self.expr(Token::Mul)?;
                    if lhs.scales_by_word() && self.ty == lhs {
                        // pointer difference, in elements
                        self.emit_op(Opcode::SUB);
                        self.emit_op(Opcode::PSH);
                        self.emit_op(Opcode::IMM);
                        self.emit(WORD_BYTES as Word);
                        self.emit_op(Opcode::DIV);
                        self.ty = Type::INT;
                    } else {
                        self.ty = lhs;
                        if self.ty.scales_by_word() {
                            self.emit_op(Opcode::PSH);
                            self.emit_op(Opcode::IMM);
                            self.emit(WORD_BYTES as Word);
                            self.emit_op(Opcode::MUL);
                        }
                        self.emit_op(Opcode::SUB);
                    }
                }
                Token::Mul => self.simple_binary(Token::Inc, Opcode::MUL)?,
                Token::Div => self.simple_binary(Token::Inc, Opcode::DIV)?,
                Token::Mod => self.simple_binary(Token::Inc, Opcode::MOD)?,
                Token::Inc | Token::Dec => {
                    // post-increment: duplicate, modify, store back, undo
                    let op = self.tok;
                    self.rewrite_load_to_push(ErrorKind::BadLvalueInPostIncrement)?;
                    let step = self.step_size();
                    self.emit_op(Opcode::PSH);
                    self.emit_op(Opcode::IMM);
                    self.emit(step);
                    self.emit_op(if op == Token::Inc { Opcode::ADD } else { Opcode::SUB });
                    self.store_value();
                    self.emit_op(Opcode::PSH);
                    self.emit_op(Opcode::IMM);
                    self.emit(step);
                    self.emit_op(if op == Token::Inc { Opcode::SUB } else { Opcode::ADD });
                    self.next();
                }
                Token::Brak => {
                    self.next();
                    self.emit_op(Opcode::PSH);
                    self.expr(Token::Assign)?;
                    self.expect(Token::RBracket, ErrorKind::CloseBracketExpected)?;
                    let element = match lhs.element_type() {
                        Some(element) => element,
                        None => return Err(self.error(ErrorKind::PointerTypeExpected)),
                    };
                    if lhs.scales_by_word() {
                        self.emit_op(Opcode::PSH);
                        self.emit_op(Opcode::IMM);
                        self.emit(WORD_BYTES as Word);
                        self.emit_op(Opcode::MUL);
                    }
                    self.emit_op(Opcode::ADD);
                    self.load_value(element);
                }
                _ => return Err(self.error(ErrorKind::Internal)),
            }
        }
        Ok(())
    }

    /// One primary or prefix form; sets the `ty` register.
    fn prefix(&mut self) -> Result<(), Error> {
        match self.tok {
            Token::Eof => Err(self.error(ErrorKind::UnexpectedEof)),
            Token::Num => {
                self.emit_op(Opcode::IMM);
                let value = self.ival;
                self.emit(value);
                self.next();
                self.ty = Type::INT;
                Ok(())
            }
            Token::Str => {
                self.emit_op(Opcode::IMM);
                let address = self.ival;
                self.emit(address);
                self.next();
                // adjacent literals were interned back to back already
                while self.tok == Token::Str {
                    self.next();
                }
                let aligned = (self.data.len() + WORD_BYTES) & !(WORD_BYTES - 1);
                self.data.resize(aligned, 0);
                self.ty = Type::CHAR.pointer_to();
                Ok(())
            }
            Token::Sizeof => {
                self.next();
                self.expect(Token::LParen, ErrorKind::OpenParenExpected)?;
                self.ty = Type::INT;
                if self.tok == Token::Int {
                    self.next();
                } else if self.tok == Token::Char {
                    self.next();
                    self.ty = Type::CHAR;
                }
                while self.tok == Token::Mul {
                    self.next();
                    self.ty = self.ty.pointer_to();
                }
                self.expect(Token::RParen, ErrorKind::CloseParenExpected)?;
                self.emit_op(Opcode::IMM);
                let size = self.ty.size_of();
                self.emit(size);
                self.ty = Type::INT;
                Ok(())
            }
            Token::Id => {
                let symbol = self.sym;
                self.next();
                if self.tok == Token::LParen {
                    return self.call(symbol);
                }
                let (class, ty, value) = self.symbol_info(symbol);
                match class {
                    Some(Class::Num) => {
                        self.emit_op(Opcode::IMM);
                        self.emit(value);
                        self.ty = Type::INT;
                        Ok(())
                    }
                    Some(Class::Loc) => {
                        self.emit_op(Opcode::LEA);
                        let offset = self.loc - value;
                        self.emit(offset);
                        self.load_value(ty);
                        Ok(())
                    }
                    Some(Class::Glo) => {
                        self.emit_op(Opcode::IMM);
                        self.emit(value);
                        self.load_value(ty);
                        Ok(())
                    }
                    _ => Err(self.error(ErrorKind::UndefinedVariable)),
                }
            }
            Token::LParen => {
                self.next();
                if self.tok == Token::Int || self.tok == Token::Char {
                    // cast: no code, only the type register changes
                    let mut ty = if self.tok == Token::Int {
                        Type::INT
                    } else {
                        Type::CHAR
                    };
                    self.next();
                    while self.tok == Token::Mul {
                        self.next();
                        ty = ty.pointer_to();
                    }
                    self.expect(Token::RParen, ErrorKind::BadCast)?;
                    self.expr(Token::Inc)?;
                    self.ty = ty;
                } else {
                    self.expr(Token::Assign)?;
                    self.expect(Token::RParen, ErrorKind::CloseParenExpected)?;
                }
                Ok(())
            }
            Token::Mul => {
                self.next();
                self.expr(Token::Inc)?;
                let element = match self.ty.element_type() {
                    Some(element) => element,
                    None => return Err(self.error(ErrorKind::BadDereference)),
                };
                self.load_value(element);
                Ok(())
            }
            Token::And => {
                self.next();
                self.expr(Token::Inc)?;
                if self.last_is_load().is_none() {
                    return Err(self.error(ErrorKind::BadAddressOf));
                }
                self.code.pop();
                self.ty = self.ty.pointer_to();
                Ok(())
            }
            Token::Not => {
                self.next();
                self.expr(Token::Inc)?;
                self.emit_op(Opcode::PSH);
                self.emit_op(Opcode::IMM);
                self.emit(0);
                self.emit_op(Opcode::EQ);
                self.ty = Type::INT;
                Ok(())
            }
            Token::Tilde => {
                self.next();
                self.expr(Token::Inc)?;
                self.emit_op(Opcode::PSH);
                self.emit_op(Opcode::IMM);
                self.emit(-1);
                self.emit_op(Opcode::XOR);
                self.ty = Type::INT;
                Ok(())
            }
            Token::Add => {
                self.next();
                self.expr(Token::Inc)?;
                self.ty = Type::INT;
                Ok(())
            }
            Token::Sub => {
                self.next();
                self.emit_op(Opcode::IMM);
                if self.tok == Token::Num {
                    // fold the negation into the literal
                    let value = self.ival.wrapping_neg();
                    self.emit(value);
                    self.next();
                } else {
                    self.emit(-1);
                    self.emit_op(Opcode::PSH);
                    self.expr(Token::Inc)?;
                    self.emit_op(Opcode::MUL);
                }
                self.ty = Type::INT;
                Ok(())
            }
            Token::Inc | Token::Dec => {
                let op = self.tok;
                self.next();
                self.expr(Token::Inc)?;
                self.rewrite_load_to_push(ErrorKind::BadLvalueInPreIncrement)?;
                let step = self.step_size();
                self.emit_op(Opcode::PSH);
                self.emit_op(Opcode::IMM);
                self.emit(step);
                self.emit_op(if op == Token::Inc { Opcode::ADD } else { Opcode::SUB });
                self.store_value();
                Ok(())
            }
            _ => Err(self.error(ErrorKind::BadExpression)),
        }
    }

    /// Function-call postfix: arguments left to right, each pushed; user
    /// functions get a `JSR`, built-ins emit their syscall opcode directly;
    /// the argument words are popped with a trailing `ADJ`.
    fn call(&mut self, symbol: usize) -> Result<(), Error> {
        self.next(); // '('
        let mut argc: Word = 0;
        while self.tok != Token::RParen {
            self.expr(Token::Assign)?;
            self.emit_op(Opcode::PSH);
            argc += 1;
            if self.tok == Token::Comma {
                self.next();
            }
        }
        self.next();
        let (class, ty, value) = self.symbol_info(symbol);
        match class {
            Some(Class::Sys) => {
                self.emit(value);
            }
            Some(Class::Fun) => {
                self.emit_op(Opcode::JSR);
                self.emit(value);
            }
            _ => return Err(self.error(ErrorKind::BadFunctionCall)),
        }
        if argc > 0 {
            self.emit_op(Opcode::ADJ);
            self.emit(argc);
        }
        self.ty = ty;
        Ok(())
    }

    fn simple_binary(&mut self, next_level: Token, op: Opcode) -> Result<(), Error> {
        self.next();
        self.emit_op(Opcode::PSH);
        self.expr(next_level)?;
        self.emit_op(op);
        self.ty = Type::INT;
        Ok(())
    }

    /// Rewrites the trailing `LC`/`LI` into `PSH` followed by the same load,
    /// leaving the value in the accumulator with its address pushed.
    fn rewrite_load_to_push(&mut self, kind: ErrorKind) -> Result<(), Error> {
        match self.last_is_load() {
            Some(load) => {
                let last = self.code.len() - 1;
                self.code[last] = enum_to_word(Opcode::PSH);
                self.code.push(load);
                Ok(())
            }
            None => Err(self.error(kind)),
        }
    }

    fn load_value(&mut self, ty: Type) {
        self.ty = ty;
        self.emit_op(if ty == Type::CHAR { Opcode::LC } else { Opcode::LI });
    }

    fn store_value(&mut self) {
        self.emit_op(if self.ty == Type::CHAR {
            Opcode::SC
        } else {
            Opcode::SI
        });
    }

    /// Increment step: word-scaled pointers move by the word size, anything
    /// else by one.
    fn step_size(&self) -> Word {
        if self.ty.scales_by_word() {
            WORD_BYTES as Word
        } else {
            1
        }
    }
}
