use minish::Interpreter;

fn main() {
    let mut sh = Interpreter::default();
    match sh.repl() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("minish: {e:#}");
            std::process::exit(1);
        }
    }
}
