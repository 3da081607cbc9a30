use crate::{
    BinaryOp, BinaryOpType, Context, EntityDescriptor, Error, Expr, Parameters, PatternOp,
    Result, SqlWriter, UnaryOp, UnaryOpType, Value, evaluate, possibly_parenthesized,
};

/// Boolean SQL fragment, without the leading `where`, and its parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompiledPredicate {
    pub sql: String,
    pub parameters: Parameters,
}

/// Compile a predicate over `entity` into a fresh parameter set.
pub fn compile(
    writer: &dyn SqlWriter,
    entity: &EntityDescriptor,
    predicate: &Expr,
) -> Result<CompiledPredicate> {
    let mut context = Context::default();
    let mut sql = String::with_capacity(128);
    PredicateCompiler::new(writer, entity, &mut context).write_predicate(&mut sql, predicate)?;
    Ok(CompiledPredicate {
        sql,
        parameters: context.parameters,
    })
}

/// Walks an [`Expr`] emitting SQL, every constant becomes the next parameter of the context.
pub struct PredicateCompiler<'a> {
    writer: &'a dyn SqlWriter,
    entity: &'a EntityDescriptor,
    context: &'a mut Context,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(
        writer: &'a dyn SqlWriter,
        entity: &'a EntityDescriptor,
        context: &'a mut Context,
    ) -> Self {
        Self {
            writer,
            entity,
            context,
        }
    }

    /// Expression in boolean position: top level, operand of `and`, `or` and `not`.
    pub fn write_predicate(&mut self, out: &mut String, expr: &Expr) -> Result<()> {
        if !expr.references_member() {
            let value = evaluate(expr)
                .ok_or_else(|| Error::msg("Constant predicate cannot be evaluated"))?;
            let condition = match value {
                Value::Boolean(v) => v.unwrap_or(false),
                Value::Null => false,
                _ => {
                    return Err(Error::msg(format!(
                        "Constant predicate evaluates to {value}, a boolean is required"
                    )));
                }
            };
            self.writer.write_constant_condition(out, condition);
            return Ok(());
        }
        match expr {
            Expr::Column(member) => {
                let column = self.entity.mapped_column(*member)?;
                if !column.is_bool {
                    return Err(Error::msg(format!(
                        "Member `{member}` of `{}` is not boolean and cannot be used as a condition",
                        self.entity.entity
                    )));
                }
                self.writer
                    .write_truthy(self.context, out, self.entity, column);
            }
            Expr::Binary(BinaryOp { op, lhs, rhs }) if op.is_logical() => {
                out.push('(');
                self.write_predicate(out, lhs)?;
                out.push(')');
                self.writer.write_binary_op_infix(out, op);
                out.push('(');
                self.write_predicate(out, rhs)?;
                out.push(')');
            }
            Expr::Unary(UnaryOp {
                op: UnaryOpType::Not,
                arg,
            }) => {
                self.writer.write_unary_op_prefix(out, &UnaryOpType::Not);
                out.push('(');
                self.write_predicate(out, arg)?;
                out.push(')');
            }
            _ => self.write_expression(out, expr)?,
        }
        Ok(())
    }

    /// Expression in value position.
    pub fn write_expression(&mut self, out: &mut String, expr: &Expr) -> Result<()> {
        if !expr.references_member()
            && let Some(value) = evaluate(expr)
        {
            self.write_value(out, value);
            return Ok(());
        }
        match expr {
            Expr::Column(member) => {
                let column = self.entity.mapped_column(*member)?;
                self.writer
                    .write_column_ref(self.context, out, self.entity, column);
            }
            Expr::Constant(value) => self.write_value(out, value.clone()),
            Expr::Binary(value) => self.write_binary(out, value)?,
            Expr::Unary(value) => {
                let precedence = self.writer.expression_unary_op_precedence(&value.op);
                self.writer.write_unary_op_prefix(out, &value.op);
                possibly_parenthesized!(
                    out,
                    value.arg.precedence(self.writer) <= precedence,
                    self.write_expression(out, &value.arg)?
                );
            }
            Expr::Pattern(value) => self.write_pattern(out, value)?,
        }
        Ok(())
    }

    fn write_value(&mut self, out: &mut String, value: Value) {
        let name = self.context.add_parameter(value);
        self.writer.write_parameter(out, &name);
    }

    fn write_binary(&mut self, out: &mut String, value: &BinaryOp) -> Result<()> {
        if matches!(value.op, BinaryOpType::Equal | BinaryOpType::NotEqual) {
            let is_null = |v: &Expr| !v.references_member() && evaluate(v).is_some_and(|v| v.is_null());
            let negated = value.op == BinaryOpType::NotEqual;
            if is_null(&value.rhs) {
                return self.write_is_null(out, &value.lhs, negated);
            }
            if is_null(&value.lhs) {
                return self.write_is_null(out, &value.rhs, negated);
            }
        }
        let precedence = self.writer.expression_binary_op_precedence(&value.op);
        possibly_parenthesized!(
            out,
            value.lhs.precedence(self.writer) < precedence,
            self.write_expression(out, &value.lhs)?
        );
        self.writer.write_binary_op_infix(out, &value.op);
        possibly_parenthesized!(
            out,
            value.rhs.precedence(self.writer) <= precedence,
            self.write_expression(out, &value.rhs)?
        );
        Ok(())
    }

    fn write_is_null(&mut self, out: &mut String, operand: &Expr, negated: bool) -> Result<()> {
        let precedence = self.writer.expression_pattern_precedence();
        possibly_parenthesized!(
            out,
            operand.precedence(self.writer) <= precedence,
            self.write_expression(out, operand)?
        );
        self.writer.write_is_null(out, negated);
        Ok(())
    }

    fn write_pattern(&mut self, out: &mut String, value: &PatternOp) -> Result<()> {
        let precedence = self.writer.expression_pattern_precedence();
        possibly_parenthesized!(
            out,
            value.target.precedence(self.writer) <= precedence,
            self.write_expression(out, &value.target)?
        );
        self.writer.write_like(out);
        if value.pattern.references_member() {
            let mut operand = String::with_capacity(32);
            possibly_parenthesized!(
                operand,
                value.pattern.precedence(self.writer) < 1_000_000,
                self.write_expression(&mut operand, &value.pattern)?
            );
            self.writer
                .write_pattern_concat(out, value.kind, &operand);
            return Ok(());
        }
        match evaluate(&value.pattern) {
            Some(Value::Varchar(Some(pattern))) => {
                self.write_value(out, Value::Varchar(Some(value.kind.decorate(&pattern))));
                Ok(())
            }
            Some(other) => Err(Error::msg(format!(
                "The argument of {:?} must be a string, found {other}",
                value.kind
            ))),
            None => Err(Error::msg(format!(
                "The argument of {:?} cannot be evaluated",
                value.kind
            ))),
        }
    }
}
