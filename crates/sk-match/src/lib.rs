//! The call-argument matcher (the hardest single algorithm in the
//! pipeline): given a declared parameter list and a call's argument
//! list, replays the source compiler's greedy forward-scan binding so
//! that elided labels, reordering, omitted defaults, a trailing
//! closure, and variadics all resolve the way the source frontend would
//! have resolved them.

use sk_ast::{FunctionParameter, LabeledExpression};

/// One declared parameter's bound call-argument indices, in the order
/// they appear in the original call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub parameter_index: usize,
    pub argument_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// One entry per declared parameter, in declaration order.
    pub bindings: Vec<Binding>,
}

impl MatchResult {
    pub fn binding_for(&self, parameter_index: usize) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.parameter_index == parameter_index)
    }
}

fn expects_unlabeled(param_label: &str) -> bool {
    param_label == "_"
}

fn call_label_matches(param: &FunctionParameter, call_label: Option<&str>) -> bool {
    if expects_unlabeled(&param.label) {
        call_label.is_none()
    } else {
        let expected = param.api_label.as_deref().unwrap_or(param.label.as_str());
        call_label == Some(expected)
    }
}

fn is_unlabeled_trailing_closure(arg: &LabeledExpression) -> bool {
    arg.label.is_none()
        && matches!(
            arg.expression.payload,
            sk_ast::ExpressionKind::Closure { is_trailing: true, .. }
        )
}

/// Finds the rightmost parameter whose declared type is a function type,
/// per the "forward policy" for trailing-closure binding.
fn last_function_typed_parameter(parameters: &[FunctionParameter]) -> Option<usize> {
    parameters
        .iter()
        .enumerate()
        .rev()
        .find(|(_, p)| sk_ast::typestr::parse_function_type(&p.type_name).is_some())
        .map(|(i, _)| i)
}

/// Attempts to bind `arguments` to `parameters`. Returns `None` on any
/// failure (required parameter left unfilled, leftover unconsumed
/// arguments, or an unlabeled trailing closure with no function-typed
/// parameter to land on) -- the caller is expected to strip all labels
/// and emit a diagnostic in that case, per spec.
pub fn match_call(
    parameters: &[FunctionParameter],
    arguments: &[LabeledExpression],
    allows_trailing_closure: bool,
) -> Option<MatchResult> {
    let trailing_closure_index = if allows_trailing_closure {
        arguments.last().filter(|a| is_unlabeled_trailing_closure(a)).map(|_| arguments.len() - 1)
    } else {
        None
    };

    let trailing_param = match trailing_closure_index {
        Some(_) => Some(last_function_typed_parameter(parameters)?),
        None => None,
    };

    let positional: Vec<usize> = (0..arguments.len())
        .filter(|&i| Some(i) != trailing_closure_index)
        .collect();

    let mut bindings = Vec::with_capacity(parameters.len());
    let mut cursor = 0usize;

    for (pi, param) in parameters.iter().enumerate() {
        if Some(pi) == trailing_param {
            continue;
        }
        if param.is_variadic {
            let mut consumed = Vec::new();
            while cursor < positional.len() {
                let arg_idx = positional[cursor];
                let arg = &arguments[arg_idx];
                if call_label_matches(param, arg.label.as_deref()) {
                    consumed.push(arg_idx);
                    cursor += 1;
                } else {
                    break;
                }
            }
            bindings.push(Binding {
                parameter_index: pi,
                argument_indices: consumed,
            });
        } else if cursor < positional.len() && call_label_matches(param, arguments[positional[cursor]].label.as_deref()) {
            bindings.push(Binding {
                parameter_index: pi,
                argument_indices: vec![positional[cursor]],
            });
            cursor += 1;
        } else if param.default.is_some() {
            bindings.push(Binding {
                parameter_index: pi,
                argument_indices: vec![],
            });
        } else {
            return None;
        }
    }

    if cursor != positional.len() {
        return None;
    }

    if let Some(tp) = trailing_param {
        bindings.push(Binding {
            parameter_index: tp,
            argument_indices: vec![trailing_closure_index.unwrap()],
        });
    }

    bindings.sort_by_key(|b| b.parameter_index);
    Some(MatchResult { bindings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::{ExpressionKind, Node};

    fn param(label: &str, type_name: &str, default: bool, variadic: bool) -> FunctionParameter {
        FunctionParameter {
            label: label.into(),
            api_label: None,
            type_name: type_name.into(),
            default: if default {
                Some(Box::new(Node::new(ExpressionKind::NilLiteral)))
            } else {
                None
            },
            is_variadic: variadic,
            is_autoclosure: false,
        }
    }

    fn arg(label: Option<&str>) -> LabeledExpression {
        LabeledExpression {
            label: label.map(Into::into),
            expression: Box::new(Node::new(ExpressionKind::NilLiteral)),
        }
    }

    #[test]
    fn simple_labeled_call_binds_in_order() {
        let params = vec![param("x", "Int", false, false), param("y", "Int", false, false)];
        let args = vec![arg(Some("x")), arg(Some("y"))];
        let result = match_call(&params, &args, false).unwrap();
        assert_eq!(result.binding_for(0).unwrap().argument_indices, vec![0]);
        assert_eq!(result.binding_for(1).unwrap().argument_indices, vec![1]);
    }

    #[test]
    fn defaulted_parameter_may_be_omitted() {
        let params = vec![param("x", "Int", false, false), param("y", "Int", true, false)];
        let args = vec![arg(Some("x"))];
        let result = match_call(&params, &args, false).unwrap();
        assert!(result.binding_for(1).unwrap().argument_indices.is_empty());
    }

    #[test]
    fn variadic_consumes_consecutive_matching_labels() {
        let params = vec![param("xs", "Int", false, true)];
        let args = vec![arg(Some("xs")), arg(Some("xs")), arg(Some("xs"))];
        let result = match_call(&params, &args, false).unwrap();
        assert_eq!(result.binding_for(0).unwrap().argument_indices, vec![0, 1, 2]);
    }

    #[test]
    fn unlabeled_trailing_closure_binds_to_last_function_typed_parameter() {
        let params = vec![
            param("_", "Int", false, false),
            param("_", "(Int) -> Bool", false, false),
        ];
        let trailing = LabeledExpression {
            label: None,
            expression: Box::new(Node::new(ExpressionKind::Closure {
                parameters: vec![],
                body: vec![],
                type_name: None,
                is_trailing: true,
            })),
        };
        let args = vec![arg(None), trailing];
        let result = match_call(&params, &args, true).unwrap();
        assert_eq!(result.binding_for(1).unwrap().argument_indices, vec![1]);
    }

    #[test]
    fn leftover_unconsumed_argument_fails() {
        let params = vec![param("x", "Int", false, false)];
        let args = vec![arg(Some("x")), arg(Some("y"))];
        assert!(match_call(&params, &args, false).is_none());
    }

    #[test]
    fn missing_required_argument_fails() {
        let params = vec![param("x", "Int", false, false)];
        let args = vec![];
        assert!(match_call(&params, &args, false).is_none());
    }
}
