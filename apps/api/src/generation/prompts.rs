// Prompt constants and construction for the Generation module.
// Pure string work: no I/O, no logging, no clock. Same input, same output.

use crate::generation::{EmailStyle, GenerationRequest, SenderProfile};

/// Substituted when a Custom request arrives with blank instructions, so the
/// instructions section is never empty.
pub const FALLBACK_CUSTOM_INSTRUCTIONS: &str = "Write a professional networking email.";

// Stand-ins for sender fields when no profile exists. Styles differ on
// purpose: a referral ask assumes a software background, the others do not.
const DEFAULT_SENDER_NAME: &str = "A professional";
const DEFAULT_SENDER_ROLE: &str = "Not specified";
const MINIMAL_DEFAULT_ROLE: &str = "Software professional";
const MINIMAL_DEFAULT_BACKGROUND: &str = "relevant technical experience";
const CUSTOM_DEFAULT_BACKGROUND: &str = "relevant background and experience";
const DEFAULT_TARGET_ROLES: &str = "career growth";

/// Connection-finding outreach used when the sender has a usable profile.
/// Replace: {sender_name}, {sender_role}, {sender_targets},
///          {sender_background}, {first_name}, {recipient_profile}
const DEFAULT_CONNECTION_TEMPLATE: &str = r#"You are writing a personalized cold email for LinkedIn outreach.

ABOUT THE SENDER:
- Name: {sender_name}
- Current Role: {sender_role}
- Looking for: {sender_targets}
- Background: {sender_background}

RECIPIENT'S LINKEDIN PROFILE:
{recipient_profile}

INSTRUCTIONS:
First, identify any genuine connections between the sender and recipient:
- Same companies (past or present)
- Similar educational background
- Overlapping skills or technologies
- Same industry or domain
- Similar career trajectory
- Shared interests or achievements

Then write an email following this structure:

1. OPENING: Greet them and mention what caught your attention about their profile. If there's a genuine connection (same school, company, skill), mention it naturally here. (2-3 sentences)

2. YOUR BACKGROUND: Briefly introduce yourself using the sender's background. Highlight any relevant overlap with the recipient. (1-2 sentences)

3. THE ASK: Mention they've already achieved what you're working towards and that a conversation would help you learn from their experience. (2 sentences)

4. CALL TO ACTION: Request a 15-minute call at their convenience.

Make it:
- Conversational and genuine (not formal or stiff)
- Specific to their actual experience from their profile
- Highlight genuine connections naturally (don't force it if none exist)
- Keep it concise (under 150 words)
- DO NOT include subject line, just the email body
- Sign off with the sender's first name ({first_name})

Write only the email body:"#;

/// Generic outreach used when no usable sender profile is available.
/// Replace: {recipient_profile}
const DEFAULT_GENERIC_TEMPLATE: &str = r#"You are writing a personalized cold email for LinkedIn outreach. Based on the profile information below, write an email following this exact structure:

1. OPENING: Start with greeting and mention what caught your attention about their profile (2-3 sentences, be specific about their experience/achievements)

2. YOUR BACKGROUND: Briefly mention you have relevant background and are in early stage of your journey/career/project (1-2 sentences)

3. THE ASK: Mention they've already achieved what you're working towards and that having a conversation would be really helpful to learn from their decisions and experience (2 sentences)

4. CALL TO ACTION: Request a 15-minute call next week at their convenience

Make it:
- Conversational and genuine (not overly formal)
- Specific to their actual experience/role/achievements from their profile
- Show you've read their profile carefully
- Keep it concise (under 150 words total)
- DO NOT include subject line, just the email body
- Use their name if available

LinkedIn Profile Data:
{recipient_profile}

Write only the email body:"#;

/// Short, direct referral ask.
/// Replace: {sender_name}, {sender_role}, {sender_background},
///          {first_name}, {recipient_profile}
const MINIMAL_TEMPLATE: &str = r#"You are writing a short, direct cold email requesting a job referral.

ABOUT THE SENDER:
- Name: {sender_name}
- Current Role: {sender_role}
- Background/Skills: {sender_background}

RECIPIENT'S LINKEDIN PROFILE:
{recipient_profile}

INSTRUCTIONS:
Write a very short referral request email (under 80 words):

1. One line: Mention you found a specific role at their company (extract company from their profile) and you're interested
2. One line: Briefly state your relevant experience (years + key tech/skills)
3. One line: Ask directly if they'd be open to referring you, offer to send resume
4. One line: Thank them either way
5. Sign off with sender's first name ({first_name})

Make it:
- Very concise and direct
- Respectful of their time
- No fluff or excessive flattery
- Professional but friendly

Write only the email body:"#;

/// Recipient-focused email with a soft ask and no job-seeking language.
/// Replace: {sender_name}, {sender_role}, {sender_targets},
///          {first_name}, {recipient_profile}
const ABOUT_THEM_TEMPLATE: &str = r#"You are writing a cold email focused entirely on the recipient and learning from them.

ABOUT THE SENDER:
- Name: {sender_name}
- Current Role: {sender_role}
- Looking for: {sender_targets}

RECIPIENT'S LINKEDIN PROFILE:
{recipient_profile}

INSTRUCTIONS:
Write an email that makes it ALL about them (under 120 words):

1. OPENING: Mention 2-3 specific things that impressed you about their career/achievements (be very specific from their profile)

2. GENUINE INTEREST: Express that you'd love to learn more about their journey - pick something specific like:
   - How they transitioned into their current role
   - How they developed expertise in X
   - Their experience at [specific company]
   - A decision they made in their career

3. SOFT ASK: Say you'd love to connect and hear their perspective, no pressure

4. Sign off warmly with sender's first name ({first_name})

Make it:
- Entirely focused on them, not about asking for anything
- Genuinely curious and admiring
- Specific to their actual profile (not generic)
- No mention of job hunting or referrals

Write only the email body:"#;

/// Caller-directed email.
/// Replace: {sender_name}, {sender_role}, {sender_background},
///          {custom_instructions}, {first_name}, {recipient_profile}
const CUSTOM_TEMPLATE: &str = r#"You are writing a cold email based on custom instructions.

ABOUT THE SENDER:
- Name: {sender_name}
- Current Role: {sender_role}
- Background: {sender_background}

RECIPIENT'S LINKEDIN PROFILE:
{recipient_profile}

USER'S CUSTOM INSTRUCTIONS:
{custom_instructions}

Based on the above information and custom instructions, write the email.
Sign off with the sender's first name ({first_name}).

Write only the email body:"#;

/// Renders the prompt for one generation request. Total over every style and
/// every shape of missing sender data.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request.style {
        EmailStyle::Default => default_prompt(request),
        EmailStyle::Minimal => minimal_prompt(request),
        EmailStyle::AboutThem => about_them_prompt(request),
        EmailStyle::Custom => custom_prompt(request),
    }
}

/// Leading whitespace-delimited token of the trimmed name.
/// Blank input gives an empty string, a single word is returned whole.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

fn default_prompt(request: &GenerationRequest) -> String {
    // The connection-finding variant needs a sender with a usable name;
    // anything less renders the generic variant.
    let sender = usable_sender(request.sender.as_ref());

    match sender {
        Some(sender) => DEFAULT_CONNECTION_TEMPLATE
            .replace("{sender_name}", &sender.full_name)
            .replace(
                "{sender_role}",
                sender.current_role.as_deref().unwrap_or(DEFAULT_SENDER_ROLE),
            )
            .replace("{sender_targets}", &sender.target_roles)
            .replace("{sender_background}", &sender.about_me)
            .replace("{first_name}", first_name(&sender.full_name))
            .replace("{recipient_profile}", &request.recipient_profile_text),
        None => {
            DEFAULT_GENERIC_TEMPLATE.replace("{recipient_profile}", &request.recipient_profile_text)
        }
    }
}

fn minimal_prompt(request: &GenerationRequest) -> String {
    let sender = request.sender.as_ref();
    let name = sender.map_or(DEFAULT_SENDER_NAME, |s| s.full_name.as_str());
    let role = sender
        .and_then(|s| s.current_role.as_deref())
        .unwrap_or(MINIMAL_DEFAULT_ROLE);
    let background = sender.map_or(MINIMAL_DEFAULT_BACKGROUND, |s| s.about_me.as_str());

    MINIMAL_TEMPLATE
        .replace("{sender_name}", name)
        .replace("{sender_role}", role)
        .replace("{sender_background}", background)
        .replace("{first_name}", first_name(name))
        .replace("{recipient_profile}", &request.recipient_profile_text)
}

fn about_them_prompt(request: &GenerationRequest) -> String {
    let sender = request.sender.as_ref();
    let name = sender.map_or(DEFAULT_SENDER_NAME, |s| s.full_name.as_str());
    let role = sender
        .and_then(|s| s.current_role.as_deref())
        .unwrap_or(DEFAULT_SENDER_ROLE);
    let targets = sender.map_or(DEFAULT_TARGET_ROLES, |s| s.target_roles.as_str());

    ABOUT_THEM_TEMPLATE
        .replace("{sender_name}", name)
        .replace("{sender_role}", role)
        .replace("{sender_targets}", targets)
        .replace("{first_name}", first_name(name))
        .replace("{recipient_profile}", &request.recipient_profile_text)
}

fn custom_prompt(request: &GenerationRequest) -> String {
    let sender = request.sender.as_ref();
    let name = sender.map_or(DEFAULT_SENDER_NAME, |s| s.full_name.as_str());
    let role = sender
        .and_then(|s| s.current_role.as_deref())
        .unwrap_or(DEFAULT_SENDER_ROLE);
    let background = sender.map_or(CUSTOM_DEFAULT_BACKGROUND, |s| s.about_me.as_str());

    let instructions = request
        .custom_instructions
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_CUSTOM_INSTRUCTIONS);

    CUSTOM_TEMPLATE
        .replace("{sender_name}", name)
        .replace("{sender_role}", role)
        .replace("{sender_background}", background)
        .replace("{first_name}", first_name(name))
        .replace("{custom_instructions}", instructions)
        .replace("{recipient_profile}", &request.recipient_profile_text)
}

fn usable_sender(sender: Option<&SenderProfile>) -> Option<&SenderProfile> {
    sender.filter(|s| !s.full_name.trim().is_empty())
}
