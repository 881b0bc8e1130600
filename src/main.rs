fn main() -> Result<(), Box<dyn std::error::Error>> {
    screenwright::cli::main()
}
