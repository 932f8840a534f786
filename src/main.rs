fn main() -> anyhow::Result<()> {
    msrv_router::cli::run_cli()
}
