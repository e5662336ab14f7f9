fn main() -> anyhow::Result<()> {
    splitlens::run()
}
