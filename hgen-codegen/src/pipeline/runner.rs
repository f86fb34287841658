//! Pipeline orchestrator.

use eyre::Result;
use hgen_ir::ast::SchemaAst;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{BuildPhase, ValidatePhase},
};

/// The compilation pipeline orchestrator.
///
/// The pipeline manages the execution of compilation phases and plugin hooks.
/// It runs the built-in phases (build, validate) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(MyPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(ast)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the default lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the built-in validate phase, e.g. to change the lint set.
    pub fn validate(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on one unit.
    ///
    /// Executes all phases in order:
    /// 1. BuildPhase - builds the schema, a build error aborts
    /// 2. ValidatePhase - runs lints, collects warnings
    /// 3. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. The diagnostics
    /// explaining the failure are lost with the context, so callers that
    /// want to report them should use [`Pipeline::run_with_context`].
    pub fn run(&self, ast: SchemaAst) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(ast);
        self.run_with_context(&mut ctx)?;
        Ok(ctx)
    }

    /// Run the pipeline on a prepared context.
    pub fn run_with_context(&self, ctx: &mut CompilationContext) -> Result<()> {
        self.run_phase(&BuildPhase, ctx)?;
        self.run_phase(&self.validate, ctx)?;

        for phase in &self.phases {
            self.run_phase(phase.as_ref(), ctx)?;
        }

        Ok(())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        debug!(unit = %ctx.unit(), phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        debug!(
            unit = %ctx.unit(),
            phase = phase_name,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordPhase(Arc<Mutex<Vec<String>>>);

    impl Phase for RecordPhase {
        fn name(&self) -> &'static str {
            "record"
        }

        fn description(&self) -> &'static str {
            "Record the model names of the built schema"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            if let Some(schema) = &ctx.schema {
                let mut names = self.0.lock().unwrap();
                names.extend(schema.models().map(|m| m.name().to_string()));
            }
            Ok(())
        }
    }

    fn parse_ast(content: &str) -> SchemaAst {
        hgen_manifest::parse_str(content).expect("Failed to parse test schema")
    }

    const BLOG: &str = r#"
        [schema]
        name = "blog"

        [models.Post]
        type = "struct"
        fields = { slug = "string", title = "string" }

        [services.PostService.methods.findOne]
        inputs = { slug = "string" }
        output = "Post?"
    "#;

    #[test]
    fn test_pipeline_builds_schema() {
        let mut ctx = Pipeline::new().run(parse_ast(BLOG)).expect("pipeline should succeed");

        assert!(!ctx.has_errors());
        let schema = ctx.take_schema().unwrap();
        assert_eq!(schema.name(), "blog");
        assert!(schema.model("Post").is_some());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline.run(parse_ast(BLOG)).expect("pipeline should succeed");

        // 2 built-in phases = 2 before + 2 after hooks
        assert_eq!(before_count.load(Ordering::SeqCst), 2);
        assert_eq!(after_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_user_phase_sees_schema() {
        let names = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().phase(RecordPhase(names.clone()));

        pipeline.run(parse_ast(BLOG)).expect("pipeline should succeed");

        assert_eq!(*names.lock().unwrap(), vec!["Post".to_string()]);
    }

    #[test]
    fn test_build_failure_stops_pipeline() {
        let (plugin, before_count, _) = CountingPlugin::new();
        let pipeline = Pipeline::new().plugin(plugin);

        let mut ctx = CompilationContext::new(parse_ast(
            r#"
            [models.Post]
            type = "struct"
            fields = { author = "Ghost" }
            "#,
        ));
        let result = pipeline.run_with_context(&mut ctx);

        assert!(result.is_err());
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
        let errors: Vec<_> = ctx.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location.as_deref(), Some("Post.author"));
    }
}
