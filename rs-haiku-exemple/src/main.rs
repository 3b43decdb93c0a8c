use rs_haiku_core::model::generation_input::GenerationInput;
use rs_haiku_core::model::generator::Generator;
use rs_haiku_core::model::line::LineOrigin;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load all corpora from the "data" directory (.json and .txt files)
    // A .bin cache is written next to each corpus and reused when fresh
    let mut app: Generator = Generator::from_folder("./data")?;

    // Optional: a syllable dictionary makes counts authoritative for the words it knows
    match app.load_dictionary("./data/dictionaries/syllables.txt") {
        Ok(_) => println!("Dictionary loaded"),
        Err(e) => println!("No dictionary ({e}), using the heuristic only"),
    }

    // Default parameters: 300 attempts, word assembly after 150,
    // 50 stuck draws, 20 greedy attempts
    let mut input = GenerationInput::default();

    // Only keep lines made of dictionary words (ignored without a dictionary)
    input.strict_known_only = true;

    // Attempting to set an invalid budget
    match input.set_max_attempts(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Counting syllables directly
    let oracle = app.oracle();
    for word in ["subpoena", "testimony", "studied", "gracious", "radio"] {
        println!("{word}: {}", oracle.count(word));
    }

    // Generate 5 haikus
    for i in 0..5 {
        let haiku = app.generate_haiku(&input);
        println!("\nHaiku {}:\n{}", i + 1, haiku);
        if haiku.is_degraded() {
            println!("(the corpus could not fill every line)");
        }
    }

    // A single line, showing which strategy produced it
    let line = app.build_line(7, &input);
    match line.origin {
        LineOrigin::WholePhrase | LineOrigin::PhraseFragment => println!("\nFrom a phrase: {}", line.text),
        LineOrigin::WordAssembly | LineOrigin::Greedy => println!("\nFrom single words: {}", line.text),
        LineOrigin::Fallback | LineOrigin::Empty => println!("\nFallback: {}", line.text),
    }

    Ok(())
}
