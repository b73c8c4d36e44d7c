//! Call-site and collection-literal rewrites (spec.md §4.5): covariant
//! casts, optional-typed call targets, collection-initializer renames,
//! tuple-to-pair conversion, autoclosure wrapping, optional subscripts,
//! dot-chain optional propagation, and call-argument relabeling via
//! [`sk_match`].

use sk_ast::{Expression, ExpressionKind, LabeledExpression, Node};
use sk_ctx::Context;
use sk_pass::{walk, Parents, Pass};

/// Two covariant-cast rewrites, both turning a constructor-shaped or
/// `as`/`forceCast`-shaped collection conversion into the target's
/// dedicated conversion method:
///
/// - `MutableList<T>(seq)` -- a constructor call whose callee is a
///   `List`/`MutableList` generic type reference -- becomes
///   `seq.toMutableList<T>()` (or `.toList<T>()` for the immutable
///   spelling).
/// - `xs.as(List<T>.self)` / `xs.forceCast(List<T>.self)` become
///   `xs.cast<T>()`, with a `Mutable` infix when the target type is a
///   mutable collection and an `OrNull` suffix for the `as` (nullable)
///   spelling as opposed to `forceCast` (trapping).
pub struct CovariantInitToCast;

fn collection_ctor_rewrite(function: &Expression, arguments: &[LabeledExpression]) -> Option<ExpressionKind> {
    let ExpressionKind::TypeReference { type_name } = &function.payload else { return None };
    let (base, type_args) = sk_ast::typestr::split_generic_args(type_name)?;
    let method = match base {
        "MutableList" => "toMutableList",
        "List" | "Array" => "toList",
        _ => return None,
    };
    let [seq] = arguments else { return None };
    Some(ExpressionKind::Call {
        function: Box::new(Node::new(ExpressionKind::Dot {
            receiver: seq.expression.clone(),
            member: format!("{method}<{}>", type_args.join(", ")).into(),
            type_name: None,
        })),
        arguments: vec![],
        type_name: Some(type_name.clone()),
        allows_trailing_closure: false,
        is_pure: true,
    })
}

fn cast_call_rewrite(function: &Expression, arguments: &[LabeledExpression]) -> Option<ExpressionKind> {
    let ExpressionKind::Dot { receiver, member, .. } = &function.payload else { return None };
    let is_nullable = match member.as_str() {
        "as" => true,
        "forceCast" => false,
        _ => return None,
    };
    let [target] = arguments else { return None };
    let ExpressionKind::TypeReference { type_name } = &target.expression.payload else { return None };
    let (base, type_args) = sk_ast::typestr::split_generic_args(type_name)?;
    let mut method = String::from("cast");
    if base.starts_with("Mutable") {
        method.push_str("Mutable");
    }
    if is_nullable {
        method.push_str("OrNull");
    }
    Some(ExpressionKind::Call {
        function: Box::new(Node::new(ExpressionKind::Dot {
            receiver: receiver.clone(),
            member: format!("{method}<{}>", type_args.join(", ")).into(),
            type_name: None,
        })),
        arguments: vec![],
        type_name: None,
        allows_trailing_closure: false,
        is_pure: true,
    })
}

impl Pass for CovariantInitToCast {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, arguments, .. } = &expr.payload {
            if let Some(rewritten) = collection_ctor_rewrite(function, arguments).or_else(|| cast_call_rewrite(function, arguments)) {
                return Node::with_provenance(rewritten, expr.handle, expr.range);
            }
        }
        expr
    }
}

/// A call whose function expression is itself optional (`maybeFn?()`)
/// becomes an explicit optional-chained invocation.
pub struct OptionalFunctionCalls;

impl Pass for OptionalFunctionCalls {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, .. } = &mut expr.payload {
            let is_optional_target = matches!(
                &function.payload,
                ExpressionKind::DeclarationReference { type_name: Some(t), .. } if sk_ast::typestr::is_optional(t)
            );
            if is_optional_target {
                let inner = std::mem::replace(function.as_mut(), Node::new(ExpressionKind::NilLiteral));
                *function.as_mut() = Node::new(ExpressionKind::OptionalChain(Box::new(inner)));
            }
        }
        expr
    }
}

/// `[T]()` / `[K: V]()` empty-collection initializer calls become the
/// target's dedicated constructors (`mutableListOf()`/`mutableMapOf()`).
pub struct DataStructureInitializers;

impl Pass for DataStructureInitializers {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, arguments, .. } = &expr.payload {
            if arguments.is_empty() {
                if let ExpressionKind::TypeReference { type_name } = &function.payload {
                    if let Some(elem) = sk_ast::typestr::parse_array_sugar(type_name) {
                        return Node::with_provenance(
                            ExpressionKind::LiteralCode {
                                code: format!("mutableListOf<{elem}>()").into(),
                                type_name: Some(type_name.clone()),
                            },
                            expr.handle,
                            expr.range,
                        );
                    }
                    if sk_ast::typestr::parse_dictionary_sugar(type_name).is_some() {
                        return Node::with_provenance(
                            ExpressionKind::LiteralCode {
                                code: "mutableMapOf()".into(),
                                type_name: Some(type_name.clone()),
                            },
                            expr.handle,
                            expr.range,
                        );
                    }
                }
            }
        }
        expr
    }
}

/// A tuple literal becomes the target's two/three-element `Pair`/`Triple`
/// call when it has the right arity; larger tuples are left for
/// `DataStructureInitializers`' sibling pass to warn about instead.
pub struct TuplesToPairs;

fn pair_constructor_name(count: usize) -> Option<&'static str> {
    match count {
        2 => Some("Pair"),
        3 => Some("Triple"),
        _ => None,
    }
}

impl Pass for TuplesToPairs {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Tuple(elements) = &expr.payload {
            if let Some(ctor) = pair_constructor_name(elements.len()) {
                return Node::with_provenance(
                    ExpressionKind::Call {
                        function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                            name: ctor.into(),
                            type_name: None,
                            is_standard_library: true,
                        })),
                        arguments: elements.clone(),
                        type_name: None,
                        allows_trailing_closure: false,
                        is_pure: true,
                    },
                    expr.handle,
                    expr.range,
                );
            }
        }
        expr
    }
}

/// An argument bound to an `@autoclosure` parameter is wrapped in a
/// zero-parameter closure at the call site, since the target has no
/// autoclosure sugar of its own.
pub struct Autoclosures<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for Autoclosures<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, arguments, .. } = &mut expr.payload {
            let callee_name = match &function.payload {
                ExpressionKind::DeclarationReference { name, .. } => Some(name.as_str()),
                ExpressionKind::Dot { member, .. } => Some(member.as_str()),
                _ => None,
            };
            if let Some(name) = callee_name {
                if let Some(translation) = self.ctx.get_function_translation(name, None) {
                    for (arg, param) in arguments.iter_mut().zip(translation.parameters.iter()) {
                        if param.is_autoclosure {
                            let inner = std::mem::replace(arg.expression.as_mut(), Node::new(ExpressionKind::NilLiteral));
                            *arg.expression.as_mut() = Node::new(ExpressionKind::Closure {
                                parameters: vec![],
                                body: vec![Node::new(sk_ast::StatementKind::Return {
                                    value: Some(inner),
                                    label: None,
                                })],
                                type_name: None,
                                is_trailing: false,
                            });
                        }
                    }
                }
            }
        }
        expr
    }
}

/// A subscript on an optional receiver gets optional-chained.
pub struct OptionalSubscriptRefactor;

impl Pass for OptionalSubscriptRefactor {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Subscript { subscripted, .. } = &mut expr.payload {
            let is_optional_target = matches!(
                &subscripted.payload,
                ExpressionKind::DeclarationReference { type_name: Some(t), .. } if sk_ast::typestr::is_optional(t)
            );
            if is_optional_target {
                let inner = std::mem::replace(subscripted.as_mut(), Node::new(ExpressionKind::NilLiteral));
                *subscripted.as_mut() = Node::new(ExpressionKind::OptionalChain(Box::new(inner)));
            }
        }
        expr
    }
}

/// Any `.member` access on an optional-typed receiver gets the receiver
/// wrapped in `OptionalChain`, mirroring the effect `RearrangeIfLets`
/// applies locally to hoisted bindings, but for every dot-chain in the
/// file regardless of whether it came from an `if let`.
pub struct AddOptionalsInDotChains;

impl Pass for AddOptionalsInDotChains {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Dot { receiver, .. } = &mut expr.payload {
            let receiver_is_optional = matches!(
                &receiver.payload,
                ExpressionKind::DeclarationReference { type_name: Some(t), .. } if sk_ast::typestr::is_optional(t)
            ) || matches!(receiver.payload, ExpressionKind::OptionalChain(_));
            if receiver_is_optional && !matches!(receiver.payload, ExpressionKind::OptionalChain(_)) {
                let inner = std::mem::replace(receiver.as_mut(), Node::new(ExpressionKind::NilLiteral));
                *receiver.as_mut() = Node::new(ExpressionKind::OptionalChain(Box::new(inner)));
            }
        }
        expr
    }
}

/// Uses [`sk_match`] to re-bind a call's arguments against the
/// recorded declaration signature and relabel them with the target's
/// parameter names where they differ from the source's argument labels.
pub struct MatchCallsToDeclarations<'ctx> {
    pub ctx: &'ctx Context,
}

fn relabel(arguments: &mut [LabeledExpression], parameters: &[sk_ast::FunctionParameter], result: &sk_match::MatchResult) {
    for (param_index, param) in parameters.iter().enumerate() {
        if let Some(binding) = result.binding_for(param_index) {
            for &arg_index in &binding.argument_indices {
                if let Some(arg) = arguments.get_mut(arg_index) {
                    arg.label = Some(param.label.clone());
                }
            }
        }
    }
}

impl Pass for MatchCallsToDeclarations<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, arguments, allows_trailing_closure, .. } = &mut expr.payload {
            let callee_name = match &function.payload {
                ExpressionKind::DeclarationReference { name, .. } => Some(name.clone()),
                ExpressionKind::Dot { member, .. } => Some(member.clone()),
                _ => None,
            };
            if let Some(name) = callee_name {
                if let Some(translation) = self.ctx.get_function_translation(&name, None) {
                    if let Some(result) = sk_match::match_call(&translation.parameters, arguments, *allows_trailing_closure) {
                        relabel(arguments, &translation.parameters, &result);
                    }
                }
            }
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ctx::Config;

    #[test]
    fn mutable_list_constructor_call_becomes_to_mutable_list() {
        let mut pass = CovariantInitToCast;
        let mut parents = Parents::new();
        let call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::TypeReference { type_name: "MutableList<Int>".into() })),
            arguments: vec![LabeledExpression {
                label: None,
                expression: Box::new(Node::new(ExpressionKind::DeclarationReference {
                    name: "seq".into(),
                    type_name: None,
                    is_standard_library: false,
                })),
            }],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: true,
        });
        let result = pass.replace_expression(call, &mut parents);
        if let ExpressionKind::Call { function, arguments, .. } = &result.payload {
            assert!(arguments.is_empty());
            assert!(matches!(&function.payload, ExpressionKind::Dot { member, .. } if member == "toMutableList<Int>"));
        } else {
            panic!("expected a Call");
        }
    }

    #[test]
    fn nullable_cast_to_mutable_collection_gets_mutable_or_null_suffix() {
        let mut pass = CovariantInitToCast;
        let mut parents = Parents::new();
        let call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::Dot {
                receiver: Box::new(Node::new(ExpressionKind::DeclarationReference {
                    name: "xs".into(),
                    type_name: None,
                    is_standard_library: false,
                })),
                member: "as".into(),
                type_name: None,
            })),
            arguments: vec![LabeledExpression {
                label: None,
                expression: Box::new(Node::new(ExpressionKind::TypeReference { type_name: "MutableList<String>".into() })),
            }],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: true,
        });
        let result = pass.replace_expression(call, &mut parents);
        if let ExpressionKind::Call { function, .. } = &result.payload {
            assert!(matches!(&function.payload, ExpressionKind::Dot { member, .. } if member == "castMutableOrNull<String>"));
        } else {
            panic!("expected a Call");
        }
    }

    #[test]
    fn empty_array_sugar_initializer_becomes_mutable_list_of() {
        let mut pass = DataStructureInitializers;
        let mut parents = Parents::new();
        let call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::TypeReference { type_name: "[Int]".into() })),
            arguments: vec![],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: true,
        });
        let result = pass.replace_expression(call, &mut parents);
        assert!(matches!(&result.payload, ExpressionKind::LiteralCode { code, .. } if code == "mutableListOf<Int>()"));
    }

    #[test]
    fn two_element_tuple_becomes_pair_constructor_call() {
        let mut pass = TuplesToPairs;
        let mut parents = Parents::new();
        let tuple = Node::new(ExpressionKind::Tuple(vec![
            LabeledExpression { label: None, expression: Box::new(Node::new(ExpressionKind::IntLiteral { value: 1, radix: sk_ast::Radix::Decimal, type_name: None })) },
            LabeledExpression { label: None, expression: Box::new(Node::new(ExpressionKind::IntLiteral { value: 2, radix: sk_ast::Radix::Decimal, type_name: None })) },
        ]));
        let result = pass.replace_expression(tuple, &mut parents);
        assert!(matches!(&result.payload, ExpressionKind::Call { function, .. } if matches!(&function.payload, ExpressionKind::DeclarationReference { name, .. } if name == "Pair")));
    }

    #[test]
    fn call_arguments_relabeled_to_match_recorded_declaration() {
        let ctx = Context::new(Config::default());
        ctx.record_function_translation(sk_ctx::FunctionTranslation {
            source_name: "move".into(),
            type_name: None,
            prefix: "fun".into(),
            parameters: vec![sk_ast::FunctionParameter {
                label: "distance".into(),
                api_label: Some("by".into()),
                type_name: "Int".into(),
                default: None,
                is_variadic: false,
                is_autoclosure: false,
            }],
        });
        ctx.freeze();
        let mut pass = MatchCallsToDeclarations { ctx: &ctx };
        let mut parents = Parents::new();
        let call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                name: "move".into(),
                type_name: None,
                is_standard_library: false,
            })),
            arguments: vec![LabeledExpression {
                label: Some("by".into()),
                expression: Box::new(Node::new(ExpressionKind::IntLiteral { value: 3, radix: sk_ast::Radix::Decimal, type_name: None })),
            }],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: false,
        });
        let result = pass.replace_expression(call, &mut parents);
        if let ExpressionKind::Call { arguments, .. } = &result.payload {
            assert_eq!(arguments[0].label.as_deref(), Some("distance"));
        } else {
            panic!("expected a call");
        }
    }
}
