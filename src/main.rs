fn main() -> Result<(), Box<dyn std::error::Error>> {
    wellchat::cli::main()
}
