/// Model selector passed to the inference service with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Gpt4oMini,
}

impl Model {
    /// Identifier understood by chat-completions compatible APIs.
    pub const fn api_name(self) -> &'static str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

/// Fixed instructions placed in front of every request.
pub const INSTRUCTIONS: &str = "\
You help people find media outlets for sponsored publications on the Medialister marketplace \
(https://app.medialister.com). The marketplace catalog is searched with a URL whose query \
parameters filter outlets by topic, country, language, price per placement and website metrics \
such as Ahrefs Domain Rating or monthly traffic.

Read what the user wants to promote and where they want to promote it, then build one catalog \
search URL that lists the most relevant outlets.

Rules:
- Reply with exactly one URL starting with https://app.medialister.com/
- Put every filter into the query string of that URL; leave out filters the user did not ask for.
- If the user gave no targeting details, choose sensible topics and countries for the product.
- Do not add explanations, markdown or any other text around the URL.";

/// Builds the full request text from the two form fields.
///
/// An empty `targeting` is allowed and produces an empty section.
pub fn compose_prompt(promotion: &str, targeting: &str) -> String {
    format!(
        "{INSTRUCTIONS}\n\n\
         ### What the User Wants to Promote\n\
         {promotion}\n\n\
         ### Specific Information on Where to Promote\n\
         {targeting}"
    )
}
