use layerlint_lexer::Lexer;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let source = match args.get(1) {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => "require.config({ paths: { vendor: 'lib/vendor' } });".to_string(),
    };

    let mut count = 0;

    for result in Lexer::new(&source) {
        count += 1;
        match result {
            Ok(token_span) => {
                println!(
                    "Token {}: {:?} at {:?}",
                    count, token_span.token, token_span.span
                );
                println!("  Text: '{}'", &source[token_span.span.clone()]);
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }

    println!("Total tokens: {}", count);
}
