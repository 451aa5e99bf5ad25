fn main() -> anyhow::Result<()> {
    carpak::cli::run_cli()
}
