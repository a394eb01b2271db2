// Program compiler: syntax tree -> instruction list
//
// Thompson construction emitted straight into a flat Vec<Inst>.
// Forward jumps are emitted as placeholders and patched once the target is known.
// Priority lives in the order of Split targets: first target = preferred path.

mod program;

pub use program::{Inst, Program};

use smol_str::SmolStr;

use crate::error::{RegexError, RegexResult};
use crate::limits::SLOTS_PER_GROUP;
use crate::option::RegexOption;
use crate::pattern::Ast;

/// Compile a parsed pattern into a program.
pub fn compile(ast: &Ast, option: &RegexOption) -> RegexResult<Program> {
    let mut compiler = Compiler {
        insts: Vec::new(),
        max_len: option.max_program_len,
        max_group: 0,
    };

    compiler.emit(Inst::Save(0))?;
    compiler.compile_node(ast)?;
    compiler.emit(Inst::Save(1))?;
    compiler.emit(Inst::Match)?;

    let literal = if option.case_insensitive {
        None
    } else {
        ast.as_literal_string().map(SmolStr::from)
    };

    let program = Program {
        insts: compiler.insts,
        n_slots: (compiler.max_group + 1) * SLOTS_PER_GROUP,
        anchored_start: ast.is_start_anchored(),
        case_insensitive: option.case_insensitive,
        literal,
    };
    program.validate()?;
    Ok(program)
}

struct Compiler {
    insts: Vec<Inst>,
    max_len: usize,
    max_group: usize,
}

impl Compiler {
    #[inline]
    fn pc(&self) -> usize {
        self.insts.len()
    }

    fn emit(&mut self, inst: Inst) -> RegexResult<usize> {
        let pc = self.insts.len();
        if pc >= self.max_len {
            return Err(RegexError::ProgramTooLarge {
                len: pc + 1,
                limit: self.max_len,
            });
        }
        self.insts.push(inst);
        Ok(pc)
    }

    /// Point a placeholder `Split` at its body and exit, ordered by greediness.
    fn patch_split(&mut self, at: usize, body: usize, exit: usize, greedy: bool) {
        self.insts[at] = if greedy {
            Inst::Split(body, exit)
        } else {
            Inst::Split(exit, body)
        };
    }

    fn patch_jump(&mut self, at: usize, target: usize) {
        self.insts[at] = Inst::Jump(target);
    }

    fn compile_node(&mut self, node: &Ast) -> RegexResult<()> {
        match node {
            Ast::Empty => {}
            Ast::Literal(c) => {
                self.emit(Inst::Char(*c))?;
            }
            Ast::Any => {
                self.emit(Inst::Any)?;
            }
            Ast::Set(set) => {
                self.emit(Inst::Set(set.clone()))?;
            }
            Ast::AnchorStart => {
                self.emit(Inst::AssertStart)?;
            }
            Ast::AnchorEnd => {
                self.emit(Inst::AssertEnd)?;
            }
            Ast::Concat(nodes) => {
                for node in nodes {
                    self.compile_node(node)?;
                }
            }
            Ast::Alternation(branches) => self.compile_alternation(branches)?,
            Ast::Group { node, index } => {
                self.max_group = self.max_group.max(*index);
                self.emit(Inst::Save(index * SLOTS_PER_GROUP))?;
                self.compile_node(node)?;
                self.emit(Inst::Save(index * SLOTS_PER_GROUP + 1))?;
            }
            Ast::Repetition {
                node,
                min,
                max,
                greedy,
            } => self.compile_repetition(node, *min, *max, *greedy)?,
        }
        Ok(())
    }

    //      split L1, next
    // L1:  <branch 1>
    //      jump end
    // next: split L2, next2
    //      ...
    //      <last branch>
    // end:
    fn compile_alternation(&mut self, branches: &[Ast]) -> RegexResult<()> {
        let mut exits = Vec::with_capacity(branches.len());
        let last = branches.len().saturating_sub(1);

        for (i, branch) in branches.iter().enumerate() {
            if i == last {
                self.compile_node(branch)?;
                break;
            }
            let split = self.emit(Inst::Split(0, 0))?;
            let body = self.pc();
            self.compile_node(branch)?;
            exits.push(self.emit(Inst::Jump(0))?);
            let next = self.pc();
            self.patch_split(split, body, next, true);
        }

        let end = self.pc();
        for at in exits {
            self.patch_jump(at, end);
        }
        Ok(())
    }

    // x{n,m}: n mandatory copies, then either
    //   unbounded:  L: split body, exit; body; jump L
    //   bounded:    (m - n) nested optional copies, all exiting to the same end
    fn compile_repetition(
        &mut self,
        node: &Ast,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    ) -> RegexResult<()> {
        for _ in 0..min {
            self.compile_node(node)?;
        }

        match max {
            None => {
                let split = self.emit(Inst::Split(0, 0))?;
                let body = self.pc();
                self.compile_node(node)?;
                self.emit(Inst::Jump(split))?;
                let exit = self.pc();
                self.patch_split(split, body, exit, greedy);
            }
            Some(max) => {
                let optional = max.saturating_sub(min) as usize;
                let mut splits = Vec::with_capacity(optional);
                for _ in 0..optional {
                    splits.push(self.emit(Inst::Split(0, 0))?);
                    self.compile_node(node)?;
                }
                let end = self.pc();
                for at in splits {
                    self.patch_split(at, at + 1, end, greedy);
                }
            }
        }
        Ok(())
    }
}
