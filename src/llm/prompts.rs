/// Prompt asking for the git commands that fulfil a natural-language request
pub fn command_generation_prompt(request: &str) -> String {
    format!(
        "You are a git expert. Turn the user's request into the shell commands that accomplish it.

User request: {request}

INSTRUCTIONS:
- Respond with one command per line, in the order they must run
- Every line must be a git command starting with \"git \"
- Do NOT include explanations or numbering
- Do NOT chain commands with && or ;
- Quote arguments that contain spaces

Your response:"
    )
}

/// First recovery phase: ask for three general directions to fix a failure
pub fn recovery_options_prompt(failed_command: &str, error_message: &str) -> String {
    format!(
        "A git command failed.

Command: {failed_command}
Error: {error_message}

Suggest exactly three different ways to resolve this problem.

FORMAT:
- Number each suggestion: \"1. \", \"2. \", \"3. \"
- Start each suggestion with a short title, a colon, then a one-sentence description
- Describe the approach, do NOT write the exact commands yet
- No other text before or after the list

Example:
1. Pull first: Integrate the remote changes before pushing again"
    )
}

/// Second recovery phase: ask for the concrete commands implementing a chosen fix
pub fn recovery_commands_prompt(failed_command: &str, error_message: &str, solution: &str) -> String {
    format!(
        "A git command failed and the user picked a way to fix it.

Failed command: {failed_command}
Error: {error_message}
Chosen solution: {solution}

Give the exact git commands that implement this solution.

FORMAT:
- One command per line, in the order they must run
- Each line must start with \"git \"
- Keep explanations to a minimum and never on the same line as a command
- Use placeholders only when a value is truly unknown"
    )
}
