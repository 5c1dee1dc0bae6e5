fn main() {
    let args: Vec<_> = std::env::args().collect();

    if args.len() != 2 {
        println!("Usage:\n\tcargo run --example ast -- input.html");
        std::process::exit(1);
    }

    let text = std::fs::read_to_string(&args[1]).unwrap();

    // Report tokenizer errors too.
    let opt = h5tree::ParsingOptions {
        strict: true,
        ..h5tree::ParsingOptions::default()
    };

    match h5tree::Document::parse_with_options(&text, opt) {
        Ok(doc) => print!("{:?}", doc),
        Err(e) => println!("Error: {}.", e),
    }
}
