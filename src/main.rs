use log::info;

mod args;
mod audio;
mod coding;
mod console;
mod modules;
mod words;

fn main() -> anyhow::Result<()> {
    let args = args::command().get_matches();
    stderrlog::new()
        .module(module_path!())
        .quiet(args.get_flag("quiet"))
        .verbosity(args.get_count("verbose") as usize + 1)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;

    let mut module = args::module(&args)?;
    info!("Running module `{}`", module.name());
    module.run()
}
