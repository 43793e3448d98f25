// Cross-cutting prompt fragments. Feature prompts live next to the code that uses them.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps suggestions tied to what the resume actually says.
pub const EVIDENCE_INSTRUCTION: &str = "\
    Base every statement on the resume excerpt and keyword results provided. \
    Do NOT invent employers, dates, or credentials the candidate has not listed. \
    When a keyword is missing, suggest how the candidate could surface real, \
    relevant experience rather than telling them to add the word.";
