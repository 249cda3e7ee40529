//! Prompt assembly for the generation call.

use dealrelay_core::DealHints;

/// Source text longer than this is truncated before prompting; deal posts
/// front-load the substance and the tail is usually hashtag noise.
const SOURCE_TEXT_CAP: usize = 600;

/// Builds the instruction block sent to the text-generation collaborator.
///
/// The instructions pin down everything the post-processor cannot fix
/// afterwards: output language, section order, emoji cap, and the
/// no-fabrication rule. Sections whose hint is absent are not mentioned,
/// so the model has nothing to invent a placeholder for.
#[must_use]
pub fn build_prompt(
    source_text: &str,
    hints: &DealHints,
    affiliate_link: &str,
    language: &str,
) -> String {
    let mut sections = vec![
        "1. A one-line hook question.".to_owned(),
        "2. One line presenting the product as the answer.".to_owned(),
        "3. 3-6 short bullet points with concrete product facts from the source text.".to_owned(),
    ];
    let mut n = 4;

    if let Some(price) = &hints.price {
        sections.push(format!("{n}. A price line: the price is {price}."));
        n += 1;
    }
    if let Some(rating) = &hints.rating {
        sections.push(format!("{n}. A rating line: the rating is {rating}."));
        n += 1;
    }
    if let Some(orders) = hints.orders {
        sections.push(format!("{n}. An orders line: {orders} orders so far."));
        n += 1;
    }
    if !hints.coupon_codes.is_empty() {
        sections.push(format!(
            "{n}. A coupon line with the code(s): {}.",
            hints.coupon_codes.join(", ")
        ));
        n += 1;
    }
    sections.push(format!("{n}. A link block containing exactly this URL: {affiliate_link}"));

    let source = truncate(source_text, SOURCE_TEXT_CAP);

    format!(
        "You are a copywriter for a deals channel.\n\
         Rewrite the source post below as a short marketing post.\n\
         Rules:\n\
         - Write in {language} only.\n\
         - Use this exact section order:\n{}\n\
         - At most 6 emoji in the whole post.\n\
         - Do not invent facts, prices, ratings, or discounts that are not \
           given above or in the source text.\n\
         - If data for a section was not given, omit the section entirely.\n\
         - No hashtags, no \"click here\".\n\
         \n\
         Source post:\n{source}",
        sections.join("\n"),
    )
}

fn truncate(text: &str, cap: usize) -> &str {
    if text.len() <= cap {
        return text;
    }
    // Back off to a char boundary so multi-byte text slices cleanly.
    let mut end = cap;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
