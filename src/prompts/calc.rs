const INTRO: &str = "You are a mathematical calculator.\nEvaluate the following operation precisely.";
const RULES_HEADER: &str = "IMPORTANT rules:";
const SCHEMA: &str = "{\n  \"resultado\": number,\n  \"latex\": string\n}";
const RULES: &[&str] = &[
    "Respond ONLY with valid JSON.",
    "The JSON must have exactly these fields:",
    "\"resultado\" is the final numeric value of the operation.",
    "\"latex\" is a LaTeX expression showing the operation and its result.",
    "Do NOT use code blocks, do NOT use backtick fences, do NOT write the word json.",
    "Respond with the JSON only, no additional text.",
];

/// Build the instruction sent to the model, ending with the user's expression
/// verbatim.
pub fn build_calc_prompt(expression: &str) -> String {
    // the schema sits right under the "exactly these fields" rule
    let mut rules = String::new();
    for (i, rule) in RULES.iter().enumerate() {
        rules.push_str(&format!("- {}\n", rule));
        if i == 1 {
            for line in SCHEMA.lines() {
                rules.push_str(&format!("    {}\n", line));
            }
        }
    }

    format!(
        "{intro}\n\n{rules_header}\n{rules}\nOperation: {expression}\n",
        intro = INTRO,
        rules_header = RULES_HEADER,
        rules = rules,
        expression = expression
    )
}
