use equation_solver::{
    deadline::Deadline, solve_equation, vocabulary::Vocabulary,
};
use std::io::{BufRead, BufReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vocab = Vocabulary::default();
    let stdin = std::io::stdin();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match solve_equation(&line, &vocab, &Deadline::never()) {
            Ok(solutions) => println!("{} => {}", line.trim(), solutions),
            Err(e) => eprintln!(
                "Unable to solve \"{}\": {}",
                line.trim(),
                e.public_message()
            ),
        }
    }

    Ok(())
}
