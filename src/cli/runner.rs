use crate::{
    cli::Args,
    constructor::{Constructor, ConstructorOptions},
    error::Result,
    ioutils::read_context,
    translation::{get_translator, BbCodeInterpreter, ContextTranslator},
};

/// Main CLI runner: reads the context, translates its markup and constructs the documents
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub fn run(self) -> Result<()> {
        let context = read_context(&self.args.input)?;

        // Unknown translators and models fail before anything is written.
        let syntax = get_translator(&self.args.translator)?;
        let interpreter = BbCodeInterpreter;
        let translator = ContextTranslator::new(&interpreter, syntax.as_ref());

        let constructor = Constructor::new(self.options())?;
        constructor.translate_and_construct(context, &translator, &self.args.output_dir)?;

        println!(
            "Documentation constructed successfully in {}.",
            self.args.output_dir.display()
        );
        Ok(())
    }

    fn options(&self) -> ConstructorOptions {
        let defaults = ConstructorOptions::default();
        ConstructorOptions {
            model: self.args.model.clone(),
            models_root: self.args.models_dir.clone().unwrap_or(defaults.models_root),
            templates_path: self.args.templates.clone(),
            filters_path: self.args.filters.clone(),
            builders_path: self.args.builders.clone(),
            output_format: self.args.format.clone(),
        }
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
