//! Analysis instruction prompt construction.
//!
//! The instruction template below is the output contract the response parser
//! and report renderer both assume: a five-section report whose headers and
//! bullets use the double-asterisk and `*`/`-` markup that
//! [`crate::render`] interprets. The structure is requested in natural
//! language only; nothing enforces it on the service side, so downstream
//! consumers tolerate non-conforming responses.

/// Fixed instruction text prepended to every analysis request.
const INSTRUCTIONS: &str = "\
You are an expert investigative journalist and professional fact-checker for a world-class news organization.
Analyze the following text for factual accuracy, political bias, logical fallacies, and sensationalism.

Structure your response exactly as follows:
1. **Credibility Score**: Provide a score from 0 to 100 (where 100 is perfectly factual).
2. **Key Findings**: A bulleted list of 3-5 critical observations about the text's veracity.
3. **Bias Assessment**: Analyze the political or commercial bias.
4. **Verification Details**: Explain which parts are confirmed by external sources and which parts are disputed or unsupported.
5. **Conclusion**: A final verdict (e.g., Verified, Partially False, Misleading, Satire, or Fake).";

/// Embed `text` into the fixed instruction template.
///
/// Pure function; performs no validation of `text`. Minimum-length
/// enforcement happens in the session before analysis is requested.
pub fn build_prompt(text: &str) -> String {
    format!("{INSTRUCTIONS}\n\n---\nTEXT TO ANALYZE:\n{text}")
}
