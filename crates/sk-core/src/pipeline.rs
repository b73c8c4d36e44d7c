//! The two-round driver (spec.md §2, §5): first round populates one
//! shared [`Context`] across every file, then the context is frozen and
//! the second round runs per file against the now read-only context.

use rayon::prelude::*;
use sk_ast::SourceFile;
use sk_buffer::LineMapEntry;
use sk_ctx::{Config, Context, Diagnostic};
use sk_pass::Pass;
use sk_passes::record::{
    CleanInheritances, EnumRecording, FunctionRecording, ImplicitRawValues, InheritanceRecording,
    InitializerRecording, InitializerReturnTypes, ProtocolRecording, TemplateRecording,
};
use sk_passes::rewrite::access::{
    AccessModifiers, CatchVariableSynthesis, OpenDeclarations, ProtocolExtensionGenerics,
    RemoveOpenOnInitializers, RemoveOverrides,
};
use sk_passes::rewrite::calls::{
    AddOptionalsInDotChains, Autoclosures, CovariantInitToCast, DataStructureInitializers,
    MatchCallsToDeclarations, OptionalFunctionCalls, OptionalSubscriptRefactor, TuplesToPairs,
};
use sk_passes::rewrite::closures::ReturnsInLambdas;
use sk_passes::rewrite::declarations::{
    DescriptionToToString, EquatableOperators, OptionalInits, ProtocolContents, RawValuesMembers,
    StaticMembers,
};
use sk_passes::rewrite::escapes::EscapeDollarAndQuote;
use sk_passes::rewrite::identifiers::{
    AnonymousParameterRename, ImplicitNullInOptionals, InnerTypePrefixes, SelfToThis,
};
use sk_passes::rewrite::iflet::{
    DoubleNegativesInGuards, NullReturnToElvis, ParenthesizeOrInIf, RearrangeIfLets,
    ShadowedIfLetToIs,
};
use sk_passes::rewrite::operators::{OptionalsInConditionalCasts, RenameOperators};
use sk_passes::rewrite::supercalls::SuperCallsToHeaders;
use sk_passes::rewrite::switches::{
    AnnotationsForCaseLet, CapitalizeEnums, CharactersInSwitches, IsInSwitchesIfs,
    RemoveBreaksInSwitches, SwitchesToExpressions,
};
use sk_passes::rewrite::templates::ReplaceTemplates;
use sk_passes::rewrite::remove_extensions;
use sk_passes::warn::{
    DoubleOptionalWarning, MutableValueTypeWarning, NativeCollectionWarning,
    SideEffectWarningsInIfLets, StandardLibraryWarning, StructInitializerWarning,
};

use crate::oracle::IndexOracle;

/// The result of transpiling one file: the target text, its line-map,
/// and every diagnostic raised while producing it (spec.md §6).
pub struct FileResult {
    pub path: String,
    pub source: String,
    pub line_map: Vec<LineMapEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the nine recording passes (spec.md §4.4, in
/// [`sk_passes::recording_pass_order`]'s order) over one file.
fn run_recording_round(file: &mut SourceFile, ctx: &Context) {
    sk_pass::run(&mut InitializerReturnTypes, file);
    sk_pass::run(&mut TemplateRecording { ctx }, file);
    sk_pass::run(&mut ProtocolRecording { ctx }, file);
    sk_pass::run(&mut InitializerRecording { ctx }, file);
    sk_pass::run(&mut InheritanceRecording { ctx }, file);
    sk_pass::run(&mut ImplicitRawValues, file);
    sk_pass::run(&mut CleanInheritances { ctx }, file);
    sk_pass::run(&mut EnumRecording { ctx }, file);
    sk_pass::run(&mut FunctionRecording { ctx }, file);
    ctx.record_pass_run("recording_round");
}

/// Runs the fixed second-round order spec.md §4.5 documents, pass by
/// pass, ending with the six warning passes. "Remove extensions" is a
/// plain function rather than a [`Pass`] (it needs whole-file sibling
/// lookups, see [`sk_passes::rewrite::extensions`]), so it runs inline
/// between "protocol contents" and "shadowed if-let -> is" in the same
/// position spec.md lists it.
fn run_rewrite_round(file: &mut SourceFile, ctx: &Context) {
    sk_pass::run(&mut ReplaceTemplates { ctx }, file);
    sk_pass::run(&mut EquatableOperators, file);
    sk_pass::run(&mut RawValuesMembers, file);
    sk_pass::run(&mut DescriptionToToString, file);
    sk_pass::run(&mut OptionalInits, file);
    sk_pass::run(&mut StaticMembers, file);
    sk_pass::run(&mut ProtocolContents, file);
    remove_extensions(file);
    sk_pass::run(&mut ShadowedIfLetToIs, file);
    sk_pass::run(&mut SideEffectWarningsInIfLets { ctx }, file);
    sk_pass::run(&mut ParenthesizeOrInIf, file);
    sk_pass::run(&mut RearrangeIfLets, file);
    sk_pass::run(&mut SelfToThis, file);
    sk_pass::run(&mut ImplicitNullInOptionals, file);
    sk_pass::run(&mut AnonymousParameterRename, file);
    sk_pass::run(&mut CovariantInitToCast, file);
    sk_pass::run(&mut OptionalFunctionCalls, file);
    sk_pass::run(&mut DataStructureInitializers, file);
    sk_pass::run(&mut TuplesToPairs, file);
    sk_pass::run(&mut Autoclosures { ctx }, file);
    sk_pass::run(&mut OptionalSubscriptRefactor, file);
    sk_pass::run(&mut AddOptionalsInDotChains, file);
    sk_pass::run(&mut RenameOperators, file);
    sk_pass::run(&mut SuperCallsToHeaders, file);
    sk_pass::run(&mut OptionalsInConditionalCasts, file);
    sk_pass::run(&mut AccessModifiers, file);
    sk_pass::run(&mut OpenDeclarations, file);
    sk_pass::run(&mut ProtocolExtensionGenerics, file);
    sk_pass::run(&mut RemoveOpenOnInitializers, file);
    sk_pass::run(&mut CatchVariableSynthesis, file);
    sk_pass::run(&mut MatchCallsToDeclarations { ctx }, file);
    sk_pass::run(&mut EscapeDollarAndQuote, file);
    sk_pass::run(&mut RemoveOverrides { ctx }, file);
    sk_pass::run(&mut CharactersInSwitches, file);
    sk_pass::run(&mut AnnotationsForCaseLet { ctx }, file);
    sk_pass::run(&mut CapitalizeEnums, file);
    sk_pass::run(&mut IsInSwitchesIfs, file);
    sk_pass::run(&mut SwitchesToExpressions, file);
    sk_pass::run(&mut RemoveBreaksInSwitches, file);
    sk_pass::run(&mut ReturnsInLambdas::default(), file);
    sk_pass::run(&mut InnerTypePrefixes { ctx }, file);
    sk_pass::run(&mut DoubleNegativesInGuards, file);
    sk_pass::run(&mut NullReturnToElvis, file);

    sk_pass::run(&mut StandardLibraryWarning { ctx }, file);
    sk_pass::run(&mut DoubleOptionalWarning { ctx }, file);
    sk_pass::run(&mut MutableValueTypeWarning { ctx }, file);
    sk_pass::run(&mut StructInitializerWarning { ctx }, file);
    sk_pass::run(&mut NativeCollectionWarning { ctx }, file);

    ctx.record_pass_run("rewrite_round");
}

/// Runs the full pipeline (spec.md §2) over every file: first round
/// (recording, parallel across files, guarded by the context's internal
/// lock), freeze, second round (rewrite + warning, parallel, read-only
/// context), emit. The oracle is accepted to match the external
/// interface (spec.md §6) but no shipped pass queries it yet -- a
/// production [`IndexOracle`] implementation is out of scope here, same
/// as the frontend that would supply one.
pub fn transpile_files(files: &[SourceFile], _oracle: &dyn IndexOracle, config: Config) -> Vec<FileResult> {
    let ctx = Context::new(config);
    let mut files: Vec<SourceFile> = files.to_vec();

    files.par_iter_mut().for_each(|file| run_recording_round(file, &ctx));

    ctx.freeze();

    files.par_iter_mut().for_each(|file| run_rewrite_round(file, &ctx));

    files
        .iter()
        .map(|file| {
            let (source, line_map) = sk_emit::emit_file(&file.declarations, &ctx, &ctx.config);
            FileResult {
                path: file.path.clone(),
                source,
                line_map,
                diagnostics: ctx.diagnostics().all(),
            }
        })
        .collect()
}
