use super::CoreExpr;
use crate::ast::{Declaration, Expression, Pattern};
use crate::error::PipelineError;
use crate::lambda::Constant;

/// Lowers a fully rewritten surface tree into the core language.
///
/// Anything the rewrites were supposed to remove is reported as
/// [`PipelineError::TooComplex`] together with the offending sub-term.
pub fn lower(expr: &Expression) -> Result<CoreExpr, PipelineError> {
    match expr {
        Expression::Variable(ident) => Ok(CoreExpr::Variable(ident.value.clone())),
        Expression::Literal(literal) => Ok(CoreExpr::Constant(Constant::Literal(*literal))),
        Expression::Constructor(ident) => {
            Ok(CoreExpr::Constant(Constant::Constructor(ident.value.clone())))
        }
        Expression::Primitive(primitive) => {
            Ok(CoreExpr::Constant(Constant::Primitive(primitive.clone())))
        }
        Expression::Application(app) => {
            let func = lower(&app.func)?;
            app.args
                .iter()
                .try_fold(func, |func, arg| -> Result<CoreExpr, PipelineError> {
                    Ok(CoreExpr::app(func, lower(arg)?))
                })
        }
        Expression::Tuple(tuple) => tuple
            .elements
            .iter()
            .map(lower)
            .collect::<Result<Vec<_>, _>>()
            .map(CoreExpr::Tuple),
        Expression::Lambda(lambda) => match lambda.params.as_slice() {
            [Pattern::Variable(param)] => {
                Ok(CoreExpr::lambda(param.value.clone(), lower(&lambda.body)?))
            }
            [] => Err(PipelineError::too_complex(expr, "lambda without parameters")),
            [_] => Err(PipelineError::too_complex(expr, "pattern lambda")),
            _ => Err(PipelineError::too_complex(expr, "multi-pattern lambda")),
        },
        Expression::IfThenElse(ite) => Ok(CoreExpr::if_then_else(
            lower(&ite.condition)?,
            lower(&ite.then_expr)?,
            lower(&ite.else_expr)?,
        )),
        Expression::Let(let_expr) => match let_expr.declarations.as_slice() {
            [Declaration::Pattern(decl)] => match &decl.pattern {
                Pattern::Variable(name) => Ok(CoreExpr::let_in(
                    name.value.clone(),
                    lower(&decl.body)?,
                    lower(&let_expr.body)?,
                )),
                Pattern::Wildcard => Err(PipelineError::too_complex(expr, "joker pattern binding")),
                pattern if pattern.is_irrefutable() => {
                    Err(PipelineError::too_complex(expr, "tuple pattern binding"))
                }
                _ => Err(PipelineError::too_complex(expr, "refutable pattern binding")),
            },
            [Declaration::Function(_)] => Err(PipelineError::too_complex(expr, "function clause")),
            [Declaration::Data(_)] => Err(PipelineError::too_complex(expr, "data declaration")),
            [] => lower(&let_expr.body),
            declarations if declarations.iter().any(|d| matches!(d, Declaration::Data(_))) => {
                Err(PipelineError::too_complex(expr, "data declaration"))
            }
            _ => Err(PipelineError::too_complex(expr, "multiple declarations in one let")),
        },
        Expression::Case(_) => Err(PipelineError::too_complex(expr, "case expression")),
    }
}
