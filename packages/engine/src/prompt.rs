use std::fmt::Write;

use common::ExecutionRequest;

/// System role priming the model as an interpreter rather than an
/// assistant. Error formatting must come out verbatim so the classifier's
/// patterns have something recognizable to match.
pub const SYSTEM_PROMPT: &str = "You are a precise code execution simulator. \
Output ONLY what the code would print, no explanations or markdown. \
For errors, output the error message exactly as the compiler/interpreter would show it. \
If the code produces no output, respond with an empty output.";

/// Build the user prompt for one simulated run.
///
/// Stdin lines are enumerated with 1-based positions and the model is told
/// that input-consuming calls take them strictly in order.
pub fn build_prompt(request: &ExecutionRequest) -> String {
    let language = request.language.display_name();

    let mut prompt = format!(
        "You are a code execution engine. Execute the following {language} code and \
         provide ONLY the output that would be printed to the console. Do not include \
         any explanations, just the raw output.\n\n\
         If there are syntax errors or runtime errors, respond with the error message \
         in a format typical for {language}.\n\n"
    );

    if request.stdin.is_empty() {
        prompt.push_str("The program does not require any input.\n");
    } else {
        prompt.push_str("The program will read the following input from stdin, one value per line:\n");
        for (index, line) in request.stdin.lines().enumerate() {
            let _ = writeln!(prompt, "{}. {line}", index + 1);
        }
        prompt.push_str(
            "\nImportant: when the code uses input(), scanf(), cin or similar constructs, \
             consume these lines strictly in order: each input call reads the next line, \
             as if the user typed these values when prompted.\n",
        );
    }

    let _ = write!(
        prompt,
        "\nCode:\n```{}\n{}\n```\n\n\
         Execute this code step by step. Respond with ONLY the console output, nothing \
         else. If the code produces no output, respond with an empty line.",
        request.language.as_str(),
        request.code
    );

    prompt
}
