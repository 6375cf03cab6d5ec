//! Analysis role and prompt construction.

/// System role for the code-generation call.
///
/// Wording matters here: models that receive fence or prose instructions
/// loosely will wrap the snippet in Markdown, which the execution host does
/// not strip.
pub fn analysis_role_text() -> String {
    "You are a data analysis assistant.\nWrite Python code using Pandas and Matplotlib to answer questions about a DataFrame.\nUse a variable named `df` for the DataFrame. Assume it is already loaded.\nDo NOT read the CSV file again.\nIf you produce a table, assign it to a variable named `result` and print it using `print(result.head())`.\nIf the answer is a single value (like a max, sum, or count), use `print(...)` to display it.\nIf you create a plot, use `matplotlib.pyplot` (already imported as `plt`).\nProvide only code in plain text format without Markdown formatting.\nDo not include symbols such as ``` or ```python.\nIf there is a lack of details, provide most logical solution.\nYou are not allowed to ask for more details.".to_string()
}

/// User message embedding the column preview and the question verbatim.
pub fn build_analysis_prompt(question: &str, preview: &str, preview_rows: usize) -> String {
    format!(
        "A user has uploaded a CSV file with the following structure (first {} rows shown):\n\n{}\n\nThey asked: \"{}\"",
        preview_rows, preview, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_the_bound_variables() {
        let role = analysis_role_text();
        assert!(role.contains("`df`"));
        assert!(role.contains("`result`"));
        assert!(role.contains("`plt`"));
        assert!(role.contains("without Markdown formatting"));
    }

    #[test]
    fn prompt_embeds_preview_and_question_verbatim() {
        let preview = "dept attrition\nsales yes\nhr no";
        let prompt = build_analysis_prompt("How many rows per department?", preview, 5);
        assert!(prompt.contains(preview));
        assert!(prompt.contains("They asked: \"How many rows per department?\""));
        assert!(prompt.contains("first 5 rows"));
    }
}
