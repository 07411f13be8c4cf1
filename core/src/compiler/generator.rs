//! Bytecode generation from resolved syntax trees.
//!
//! The generator walks a [`FunctionLiteral`] and drives the
//! [`BytecodeArrayBuilder`] through one forward pass. Expression visits
//! leave their result in the accumulator; statement visits leave the
//! accumulator unspecified. Register pressure comes only from spilling:
//! the left side of a binary operator, receivers and arguments of a
//! call, and the object of a property access each park in a LIFO
//! temporary while the accumulator is busy with the other side.
//!
//! The lowering is deliberately naive. No constant folding, no
//! dead-store elimination, no peephole pass beyond boolean-cast
//! elision; downstream tiers rely on these exact shapes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Vec,
    compiler::{
        BytecodeArrayBuilder, CompileError,
        feedback::{FeedbackSlotKind, FeedbackVectorSpec},
        labels::Label,
        registers::RegisterAllocator,
    },
    syntax::{
        BinaryOp, CompareOp, Expr, FunctionLiteral, Literal, Stmt, UnaryOp, VariableLocation,
    },
    vm::{BytecodeArray, Constant, HeapHandle, Opcode, Register, RuntimeFunctionId},
};

/// Slot of the global object inside a context object.
const GLOBAL_OBJECT_SLOT: u8 = 3;

/// Embedder services the generator needs while compiling one unit.
pub trait Heap {
    /// Intern the declaration-pair array for a script's global names,
    /// returning a handle the declaration runtime call consumes.
    fn internalize_declarations(&mut self, names: &[&str]) -> HeapHandle;
}

/// Everything the interpreter needs to run one compiled function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledFunction {
    pub bytecode: BytecodeArray,
    pub feedback: FeedbackVectorSpec,
}

/// Jump sites an enclosing loop owes targets to. Each `break` and
/// `continue` parks its own forward label here; the loop binds them at
/// its exit and test points.
#[derive(Default)]
struct ControlScope {
    break_sites: Vec<Label>,
    continue_sites: Vec<Label>,
}

/// Single-pass compiler from a resolved function body to a
/// [`CompiledFunction`].
pub struct BytecodeGenerator<'a, 'h> {
    builder: BytecodeArrayBuilder,
    registers: RegisterAllocator,
    feedback: FeedbackVectorSpec,
    function: &'a FunctionLiteral<'a>,
    heap: &'h mut dyn Heap,
    control_scopes: Vec<ControlScope>,
}

impl<'a, 'h> BytecodeGenerator<'a, 'h> {
    /// Compile one function to its executable artifact.
    pub fn compile(
        function: &'a FunctionLiteral<'a>,
        heap: &'h mut dyn Heap,
    ) -> Result<CompiledFunction, CompileError> {
        debug!(name = function.name, "compiling function");
        let mut generator = BytecodeGenerator {
            builder: BytecodeArrayBuilder::new(),
            registers: RegisterAllocator::new(function.parameter_count, function.local_count)?,
            feedback: FeedbackVectorSpec::new(),
            function,
            heap,
            control_scopes: Vec::new(),
        };
        generator.generate()?;

        let frame_size = generator.registers.frame_size();
        let bytecode = generator
            .builder
            .finalize(frame_size, function.parameter_count)?;
        debug!(
            name = function.name,
            code_len = bytecode.len(),
            frame_size,
            constants = bytecode.constant_pool().len(),
            feedback_slots = generator.feedback.len(),
            "compiled function"
        );
        Ok(CompiledFunction {
            bytecode,
            feedback: generator.feedback,
        })
    }

    fn generate(&mut self) -> Result<(), CompileError> {
        if !self.function.declared_globals.is_empty() {
            self.declare_globals()?;
        }
        for stmt in self.function.body {
            self.visit_statement(stmt)?;
        }
        // A body is never allowed to run off the end of the stream.
        self.builder.ensure_return()
    }

    /// Script prologue: install this unit's global declarations in one
    /// runtime batch.
    fn declare_globals(&mut self) -> Result<(), CompileError> {
        let pairs = self
            .heap
            .internalize_declarations(self.function.declared_globals);
        let flags = self.function.language_mode as i32;

        let pairs_reg = self.registers.allocate_temporary()?;
        let flags_reg = self.registers.allocate_temporary()?;
        self.builder.load_literal(Constant::Handle(pairs))?;
        self.builder.store_accumulator_in_register(pairs_reg)?;
        self.builder.load_literal(Constant::Smi(flags))?;
        self.builder.store_accumulator_in_register(flags_reg)?;
        self.builder
            .call_runtime(RuntimeFunctionId::DECLARE_GLOBALS, pairs_reg, 2)?;
        self.registers.release_temporary(flags_reg)?;
        self.registers.release_temporary(pairs_reg)
    }

    // === Statements ===

    fn visit_statement(&mut self, stmt: &'a Stmt<'a>) -> Result<(), CompileError> {
        match stmt {
            Stmt::Expression(expr) => self.visit_expression(expr),
            Stmt::VariableDeclaration {
                name,
                location,
                initializer,
            } => self.visit_variable_declaration(name, *location, *initializer),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => self.visit_if(condition, then_branch, *else_branch),
            Stmt::While { condition, body } => self.visit_while(condition, body),
            Stmt::DoWhile { body, condition } => self.visit_do_while(body, condition),
            Stmt::For {
                init,
                condition,
                next,
                body,
            } => self.visit_for(*init, *condition, *next, body),
            Stmt::Break => self.visit_break(),
            Stmt::Continue => self.visit_continue(),
            Stmt::Return(expr) => {
                match expr {
                    Some(expr) => self.visit_expression(expr)?,
                    None => self.builder.load_undefined()?,
                }
                self.builder.return_value()
            }
        }
    }

    fn visit_statements(&mut self, stmts: &[&'a Stmt<'a>]) -> Result<(), CompileError> {
        for &stmt in stmts {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    /// Hoisting already happened during resolution, so a declaration
    /// only runs its initializer.
    fn visit_variable_declaration(
        &mut self,
        name: &'a str,
        location: VariableLocation,
        initializer: Option<&'a Expr<'a>>,
    ) -> Result<(), CompileError> {
        let Some(initializer) = initializer else {
            return Ok(());
        };
        match location {
            VariableLocation::Global => {
                // Script-scope vars initialize through the runtime so
                // redeclaration semantics stay in one place.
                let name_reg = self.registers.allocate_temporary()?;
                let mode_reg = self.registers.allocate_temporary()?;
                let value_reg = self.registers.allocate_temporary()?;
                self.builder.load_literal(Constant::Str(name.into()))?;
                self.builder.store_accumulator_in_register(name_reg)?;
                self.builder
                    .load_literal(Constant::Smi(self.function.language_mode as i32))?;
                self.builder.store_accumulator_in_register(mode_reg)?;
                self.visit_expression(initializer)?;
                self.builder.store_accumulator_in_register(value_reg)?;
                self.builder
                    .call_runtime(RuntimeFunctionId::INITIALIZE_VAR_GLOBAL, name_reg, 3)?;
                self.registers.release_temporary(value_reg)?;
                self.registers.release_temporary(mode_reg)?;
                self.registers.release_temporary(name_reg)
            }
            other => self.visit_variable_store(name, other, initializer),
        }
    }

    fn visit_if(
        &mut self,
        condition: &'a Expr<'a>,
        then_branch: &[&'a Stmt<'a>],
        else_branch: Option<&'a [&'a Stmt<'a>]>,
    ) -> Result<(), CompileError> {
        self.visit_expression(condition)?;
        self.builder.cast_accumulator_to_boolean()?;
        let else_label = self.builder.new_label();
        self.builder.jump_if_false(else_label)?;
        self.visit_statements(then_branch)?;
        match else_branch {
            Some(else_branch) => {
                let end_label = self.builder.new_label();
                self.builder.jump(end_label)?;
                self.builder.bind(else_label)?;
                self.visit_statements(else_branch)?;
                self.builder.bind(end_label)
            }
            None => self.builder.bind(else_label),
        }
    }

    fn visit_while(
        &mut self,
        condition: &'a Expr<'a>,
        body: &[&'a Stmt<'a>],
    ) -> Result<(), CompileError> {
        let body_label = self.builder.new_label();
        let condition_label = self.builder.new_label();
        self.builder.jump(condition_label)?;
        self.builder.bind(body_label)?;
        let scope = self.visit_loop_body(body)?;
        self.builder.bind(condition_label)?;
        for site in scope.continue_sites {
            self.builder.bind(site)?;
        }
        // Loop headers never cast: JumpIfTrue takes any accumulator
        // value through the boolean protocol.
        self.visit_expression(condition)?;
        self.builder.jump_if_true(body_label)?;
        for site in scope.break_sites {
            self.builder.bind(site)?;
        }
        Ok(())
    }

    fn visit_do_while(
        &mut self,
        body: &[&'a Stmt<'a>],
        condition: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        let body_label = self.builder.new_label();
        self.builder.bind(body_label)?;
        let scope = self.visit_loop_body(body)?;
        for site in scope.continue_sites {
            self.builder.bind(site)?;
        }
        self.visit_expression(condition)?;
        self.builder.jump_if_true(body_label)?;
        for site in scope.break_sites {
            self.builder.bind(site)?;
        }
        Ok(())
    }

    fn visit_for(
        &mut self,
        init: Option<&'a Stmt<'a>>,
        condition: Option<&'a Expr<'a>>,
        next: Option<&'a Expr<'a>>,
        body: &[&'a Stmt<'a>],
    ) -> Result<(), CompileError> {
        if let Some(init) = init {
            self.visit_statement(init)?;
        }
        let body_label = self.builder.new_label();
        match condition {
            Some(condition) => {
                let condition_label = self.builder.new_label();
                self.builder.jump(condition_label)?;
                self.builder.bind(body_label)?;
                let scope = self.visit_loop_body(body)?;
                // `continue` re-enters at the next clause, not the test
                for site in scope.continue_sites {
                    self.builder.bind(site)?;
                }
                if let Some(next) = next {
                    self.visit_expression(next)?;
                }
                self.builder.bind(condition_label)?;
                self.visit_expression(condition)?;
                self.builder.jump_if_true(body_label)?;
                for site in scope.break_sites {
                    self.builder.bind(site)?;
                }
            }
            None => {
                self.builder.bind(body_label)?;
                let scope = self.visit_loop_body(body)?;
                for site in scope.continue_sites {
                    self.builder.bind(site)?;
                }
                if let Some(next) = next {
                    self.visit_expression(next)?;
                }
                self.builder.jump(body_label)?;
                for site in scope.break_sites {
                    self.builder.bind(site)?;
                }
            }
        }
        Ok(())
    }

    /// Visit a loop body inside a fresh control scope; returns the
    /// break/continue sites the body parked for the caller to bind.
    fn visit_loop_body(&mut self, body: &[&'a Stmt<'a>]) -> Result<ControlScope, CompileError> {
        self.control_scopes.push(ControlScope::default());
        let result = self.visit_statements(body);
        let scope = self.control_scopes.pop().unwrap_or_default();
        result?;
        Ok(scope)
    }

    fn visit_break(&mut self) -> Result<(), CompileError> {
        debug_assert!(!self.control_scopes.is_empty(), "break outside a loop");
        let site = self.builder.new_label();
        self.builder.jump(site)?;
        if let Some(scope) = self.control_scopes.last_mut() {
            scope.break_sites.push(site);
        }
        Ok(())
    }

    fn visit_continue(&mut self) -> Result<(), CompileError> {
        debug_assert!(!self.control_scopes.is_empty(), "continue outside a loop");
        let site = self.builder.new_label();
        self.builder.jump(site)?;
        if let Some(scope) = self.control_scopes.last_mut() {
            scope.continue_sites.push(site);
        }
        Ok(())
    }

    // === Expressions ===

    fn visit_expression(&mut self, expr: &'a Expr<'a>) -> Result<(), CompileError> {
        match expr {
            Expr::Literal(literal) => self.visit_literal(literal),
            Expr::This => self
                .builder
                .load_accumulator_with_register(self.registers.parameter(0)),
            Expr::Variable { name, location } => self.visit_variable_load(name, *location),
            Expr::Assignment { target, value } => self.visit_assignment(target, value),
            Expr::Binary { op, left, right } => {
                self.visit_binary_operation(binary_opcode(*op), left, right)
            }
            Expr::Compare { op, left, right } => {
                self.visit_binary_operation(compare_opcode(*op), left, right)
            }
            Expr::Unary { op, expr } => self.visit_unary(*op, expr),
            Expr::Property { object, key } => self.visit_property_load(object, key),
            Expr::Call { callee, args } => self.visit_call(callee, args),
            Expr::CallRuntime { function, args } => self.visit_call_runtime(*function, args),
        }
    }

    fn visit_literal(&mut self, literal: &Literal<'a>) -> Result<(), CompileError> {
        match literal {
            Literal::Undefined => self.builder.load_undefined(),
            Literal::Null => self.builder.load_null(),
            Literal::Boolean(true) => self.builder.load_true(),
            Literal::Boolean(false) => self.builder.load_false(),
            Literal::Number(value) => self.builder.load_literal(number_constant(*value)),
            Literal::Str(s) => self.builder.load_literal(Constant::Str((*s).into())),
        }
    }

    fn visit_variable_load(
        &mut self,
        name: &'a str,
        location: VariableLocation,
    ) -> Result<(), CompileError> {
        match location {
            VariableLocation::Local(index) => self
                .builder
                .load_accumulator_with_register(self.registers.local(index)),
            VariableLocation::Parameter(ordinal) => self
                .builder
                .load_accumulator_with_register(self.registers.parameter(ordinal)),
            VariableLocation::Global => {
                let name_index = self.builder.intern_constant(Constant::Str(name.into()))?;
                let slot = self.feedback.reserve(FeedbackSlotKind::Load)?;
                self.builder.load_global(name_index, slot)
            }
            VariableLocation::Unallocated => {
                // Fetch the global object out of the context, then read
                // the variable as a named property on it.
                let slot = self.feedback.reserve(FeedbackSlotKind::Load)?;
                let object = self.registers.allocate_temporary()?;
                self.builder
                    .load_context_slot(Register::current_context(), GLOBAL_OBJECT_SLOT)?;
                self.builder.store_accumulator_in_register(object)?;
                self.builder.load_literal(Constant::Str(name.into()))?;
                self.builder
                    .load_named_property(object, slot, self.function.language_mode)?;
                self.registers.release_temporary(object)
            }
        }
    }

    fn visit_assignment(
        &mut self,
        target: &'a Expr<'a>,
        value: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        match target {
            Expr::Variable { name, location } => {
                self.visit_variable_store(name, *location, value)
            }
            Expr::Property { object, key } => self.visit_property_store(object, key, value),
            _ => {
                debug_assert!(false, "assignment to a non-reference");
                self.visit_expression(value)
            }
        }
    }

    /// Store the value expression into a variable. The assigned value
    /// stays in the accumulator.
    fn visit_variable_store(
        &mut self,
        name: &'a str,
        location: VariableLocation,
        value: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        match location {
            VariableLocation::Local(index) => {
                self.visit_expression(value)?;
                self.builder
                    .store_accumulator_in_register(self.registers.local(index))
            }
            VariableLocation::Parameter(ordinal) => {
                self.visit_expression(value)?;
                self.builder
                    .store_accumulator_in_register(self.registers.parameter(ordinal))
            }
            VariableLocation::Global => {
                let name_index = self.builder.intern_constant(Constant::Str(name.into()))?;
                let slot = self.feedback.reserve(FeedbackSlotKind::Store)?;
                self.visit_expression(value)?;
                self.builder.store_global(name_index, slot)
            }
            VariableLocation::Unallocated => {
                // Value first, then the global object and the name; the
                // store wants (object, name) registers with the value
                // back in the accumulator.
                let slot = self.feedback.reserve(FeedbackSlotKind::Store)?;
                let value_reg = self.registers.allocate_temporary()?;
                self.visit_expression(value)?;
                self.builder.store_accumulator_in_register(value_reg)?;
                let object = self.registers.allocate_temporary()?;
                self.builder
                    .load_context_slot(Register::current_context(), GLOBAL_OBJECT_SLOT)?;
                self.builder.store_accumulator_in_register(object)?;
                let name_reg = self.registers.allocate_temporary()?;
                self.builder.load_literal(Constant::Str(name.into()))?;
                self.builder.store_accumulator_in_register(name_reg)?;
                self.builder.load_accumulator_with_register(value_reg)?;
                self.builder.store_named_property(
                    object,
                    name_reg,
                    slot,
                    self.function.language_mode,
                )?;
                self.registers.release_temporary(name_reg)?;
                self.registers.release_temporary(object)?;
                self.registers.release_temporary(value_reg)
            }
        }
    }

    fn visit_property_load(
        &mut self,
        object_expr: &'a Expr<'a>,
        key: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        match named_key(key) {
            Some(name) => {
                let slot = self.feedback.reserve(FeedbackSlotKind::Load)?;
                let object = self.registers.allocate_temporary()?;
                self.visit_expression(object_expr)?;
                self.builder.store_accumulator_in_register(object)?;
                // The property name travels in the accumulator
                self.builder.load_literal(Constant::Str(name.into()))?;
                self.builder
                    .load_named_property(object, slot, self.function.language_mode)?;
                self.registers.release_temporary(object)
            }
            None => {
                let slot = self.feedback.reserve(FeedbackSlotKind::KeyedLoad)?;
                let object = self.registers.allocate_temporary()?;
                self.visit_expression(object_expr)?;
                self.builder.store_accumulator_in_register(object)?;
                self.visit_expression(key)?;
                self.builder
                    .load_keyed_property(object, slot, self.function.language_mode)?;
                self.registers.release_temporary(object)
            }
        }
    }

    fn visit_property_store(
        &mut self,
        object_expr: &'a Expr<'a>,
        key: &'a Expr<'a>,
        value: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        match named_key(key) {
            Some(name) => {
                let slot = self.feedback.reserve(FeedbackSlotKind::Store)?;
                let object = self.registers.allocate_temporary()?;
                let name_reg = self.registers.allocate_temporary()?;
                self.visit_expression(object_expr)?;
                self.builder.store_accumulator_in_register(object)?;
                self.builder.load_literal(Constant::Str(name.into()))?;
                self.builder.store_accumulator_in_register(name_reg)?;
                self.visit_expression(value)?;
                self.builder.store_named_property(
                    object,
                    name_reg,
                    slot,
                    self.function.language_mode,
                )?;
                self.registers.release_temporary(name_reg)?;
                self.registers.release_temporary(object)
            }
            None => {
                let slot = self.feedback.reserve(FeedbackSlotKind::KeyedStore)?;
                let object = self.registers.allocate_temporary()?;
                let key_reg = self.registers.allocate_temporary()?;
                self.visit_expression(object_expr)?;
                self.builder.store_accumulator_in_register(object)?;
                self.visit_expression(key)?;
                self.builder.store_accumulator_in_register(key_reg)?;
                self.visit_expression(value)?;
                self.builder.store_keyed_property(
                    object,
                    key_reg,
                    slot,
                    self.function.language_mode,
                )?;
                self.registers.release_temporary(key_reg)?;
                self.registers.release_temporary(object)
            }
        }
    }

    /// The left operand parks in a temporary allocated before either
    /// side is visited; the right operand stays in the accumulator.
    fn visit_binary_operation(
        &mut self,
        opcode: Opcode,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    ) -> Result<(), CompileError> {
        let lhs = self.registers.allocate_temporary()?;
        self.visit_expression(left)?;
        self.builder.store_accumulator_in_register(lhs)?;
        self.visit_expression(right)?;
        if opcode.is_comparison() {
            self.builder.compare_operation(opcode, lhs)?;
        } else {
            self.builder.binary_operation(opcode, lhs)?;
        }
        self.registers.release_temporary(lhs)
    }

    fn visit_unary(&mut self, op: UnaryOp, expr: &'a Expr<'a>) -> Result<(), CompileError> {
        self.visit_expression(expr)?;
        match op {
            UnaryOp::Not => self.builder.logical_not(),
            UnaryOp::TypeOf => self.builder.type_of(),
            // `void` evaluates its operand for effect only
            UnaryOp::Void => self.builder.load_undefined(),
        }
    }

    /// The interpreter requires `callee, receiver, args…` in one
    /// contiguous register run.
    fn visit_call(
        &mut self,
        callee: &'a Expr<'a>,
        args: &[&'a Expr<'a>],
    ) -> Result<(), CompileError> {
        // The call's slot is reserved up front so it numbers before any
        // slot its operands consume; the instruction does not encode it.
        let _slot = self.feedback.reserve(FeedbackSlotKind::Call)?;
        let callee_reg = self.registers.allocate_temporary()?;
        let receiver_reg = self.registers.allocate_temporary()?;

        match callee {
            Expr::Property { object, key } => {
                // The property's object doubles as the receiver.
                let kind = if named_key(key).is_some() {
                    FeedbackSlotKind::Load
                } else {
                    FeedbackSlotKind::KeyedLoad
                };
                let slot = self.feedback.reserve(kind)?;
                self.visit_expression(object)?;
                self.builder.store_accumulator_in_register(receiver_reg)?;
                match named_key(key) {
                    Some(name) => {
                        self.builder.load_literal(Constant::Str(name.into()))?;
                        self.builder.load_named_property(
                            receiver_reg,
                            slot,
                            self.function.language_mode,
                        )?;
                    }
                    None => {
                        self.visit_expression(key)?;
                        self.builder.load_keyed_property(
                            receiver_reg,
                            slot,
                            self.function.language_mode,
                        )?;
                    }
                }
                self.builder.store_accumulator_in_register(callee_reg)?;
            }
            other => {
                self.builder.load_undefined()?;
                self.builder.store_accumulator_in_register(receiver_reg)?;
                self.visit_expression(other)?;
                self.builder.store_accumulator_in_register(callee_reg)?;
            }
        }

        let mut arg_registers = Vec::new();
        for &arg in args {
            self.visit_expression(arg)?;
            let reg = self.registers.allocate_temporary()?;
            self.builder.store_accumulator_in_register(reg)?;
            arg_registers.push(reg);
        }

        self.builder
            .call(callee_reg, receiver_reg, args.len() as u8)?;
        for reg in arg_registers.into_iter().rev() {
            self.registers.release_temporary(reg)?;
        }
        self.registers.release_temporary(receiver_reg)?;
        self.registers.release_temporary(callee_reg)
    }

    fn visit_call_runtime(
        &mut self,
        function: RuntimeFunctionId,
        args: &[&'a Expr<'a>],
    ) -> Result<(), CompileError> {
        // A zero-argument call still anchors its register run.
        let mut arg_registers = Vec::new();
        arg_registers.push(self.registers.allocate_temporary()?);
        for (i, &arg) in args.iter().enumerate() {
            if i > 0 {
                arg_registers.push(self.registers.allocate_temporary()?);
            }
            self.visit_expression(arg)?;
            self.builder.store_accumulator_in_register(arg_registers[i])?;
        }

        self.builder
            .call_runtime(function, arg_registers[0], args.len() as u8)?;
        for reg in arg_registers.into_iter().rev() {
            self.registers.release_temporary(reg)?;
        }
        Ok(())
    }
}

/// A string-literal key makes a property access named.
fn named_key<'a>(key: &Expr<'a>) -> Option<&'a str> {
    match key {
        Expr::Literal(Literal::Str(name)) => Some(*name),
        _ => None,
    }
}

/// Numbers become Smis when integral, in `i32` range, and not `-0.0`;
/// everything else stays a Double.
fn number_constant(value: f64) -> Constant {
    let truncated = value as i32;
    if truncated as f64 == value && !(value == 0.0 && value.is_sign_negative()) {
        Constant::Smi(truncated)
    } else {
        Constant::Double(value)
    }
}

fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Sub => Opcode::Sub,
        BinaryOp::Mul => Opcode::Mul,
        BinaryOp::Div => Opcode::Div,
        BinaryOp::Mod => Opcode::Mod,
        BinaryOp::BitwiseOr => Opcode::BitwiseOr,
        BinaryOp::BitwiseXor => Opcode::BitwiseXor,
        BinaryOp::BitwiseAnd => Opcode::BitwiseAnd,
        BinaryOp::ShiftLeft => Opcode::ShiftLeft,
        BinaryOp::ShiftRight => Opcode::ShiftRight,
        BinaryOp::ShiftRightLogical => Opcode::ShiftRightLogical,
    }
}

fn compare_opcode(op: CompareOp) -> Opcode {
    match op {
        CompareOp::Equal => Opcode::TestEqual,
        CompareOp::NotEqual => Opcode::TestNotEqual,
        CompareOp::EqualStrict => Opcode::TestEqualStrict,
        CompareOp::NotEqualStrict => Opcode::TestNotEqualStrict,
        CompareOp::LessThan => Opcode::TestLessThan,
        CompareOp::GreaterThan => Opcode::TestGreaterThan,
        CompareOp::LessThanOrEqual => Opcode::TestLessThanOrEqual,
        CompareOp::GreaterThanOrEqual => Opcode::TestGreaterThanOrEqual,
        CompareOp::In => Opcode::TestIn,
        CompareOp::InstanceOf => Opcode::TestInstanceOf,
    }
}
