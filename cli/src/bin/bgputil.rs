fn main() -> anyhow::Result<()> {
    bgputil_cli::main().map_err(|err| {
        log::error!("{err:#}");
        err
    })
}
