// Sender profile endpoints — the stored background that personalizes
// generated emails.

pub mod handlers;
