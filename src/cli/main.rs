//! # Meridian CLI
//!
//! An interactive shell for the Meridian parser. Statements are accumulated
//! until a terminating `;`, parsed, and pretty-printed. Nothing is executed:
//! the shell only shows what the parser made of the input.

use std::env;
use std::io::{self, BufRead, Write};

use meridian::{Lexer, Parser, Statement, TokenKind};

fn main() {
    let args: Vec<String> = env::args().collect();

    // One-shot mode: parse the statement given on the command line and exit.
    if args.len() > 1 {
        let text = args[1..].join(" ");
        std::process::exit(run_statement(&text));
    }

    println!("Meridian v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter \".help\" for usage hints.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut buffer = String::new();

    loop {
        // Print prompt
        let prompt = if buffer.is_empty() {
            "meridian> "
        } else {
            "   ...> "
        };
        print!("{}", prompt);
        if stdout.flush().is_err() {
            break;
        }

        // Read a line
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => break,
        }

        let trimmed = line.trim();

        // Handle empty lines
        if trimmed.is_empty() {
            continue;
        }

        // Handle dot-commands
        if buffer.is_empty() && trimmed.starts_with('.') {
            handle_dot_command(trimmed);
            continue;
        }

        // Accumulate until the statement terminator shows up
        buffer.push_str(&line);
        if !buffer.trim_end().ends_with(';') {
            continue;
        }

        let text = buffer.trim().to_string();
        buffer.clear();

        run_statement(&text);
    }

    println!();
}

fn run_statement(text: &str) -> i32 {
    match Parser::new(text).parse() {
        Ok(stmt) => {
            print_statement(&stmt);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_statement(stmt: &Statement) {
    match stmt {
        Statement::Select(select) => {
            let projection: Vec<String> = select
                .projection
                .iter()
                .map(|attr| attr.to_string())
                .collect();
            println!("SELECT");
            println!("  projection: {}", projection.join(", "));
            println!("  tables:     {}", select.tables.join(", "));
            if !select.conditions.is_empty() {
                let conditions: Vec<String> = select
                    .conditions
                    .iter()
                    .map(|cond| cond.to_string())
                    .collect();
                println!("  where:      {}", conditions.join(", "));
            }
        }
        // No grammar rules produce these yet.
        Statement::CreateTable | Statement::Insert | Statement::Update => {}
    }
}

fn dump_tokens(text: &str) {
    let mut lexer = Lexer::new(text);
    loop {
        let kind = lexer.advance();
        if kind == TokenKind::Invalid {
            // Invalid marks both end of input and a scan failure; either
            // way there is nothing more to show.
            break;
        }
        match lexer.value() {
            Some(value) => println!("{:?}({})", kind, value),
            None => println!("{:?}", kind),
        }
    }
}

fn handle_dot_command(cmd: &str) {
    let (command, rest) = match cmd.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (cmd.to_lowercase(), ""),
    };

    match command.as_str() {
        ".help" => {
            println!(".help               Show this help");
            println!(".tokens STATEMENT   Dump the token stream of a statement");
            println!(".quit               Exit this program");
            println!(".exit               Exit this program");
        }
        ".tokens" => {
            if rest.is_empty() {
                eprintln!("Error: usage: .tokens STATEMENT");
            } else {
                dump_tokens(rest);
            }
        }
        ".quit" | ".exit" => {
            std::process::exit(0);
        }
        _ => {
            eprintln!("Error: unknown command: {}", command);
            eprintln!("Use .help for a list of commands.");
        }
    }
}
