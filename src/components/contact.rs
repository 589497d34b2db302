use dioxus::prelude::*;

/// Contact form. Submission is simulated: the message is not sent anywhere,
/// the form just acknowledges after a short delay and resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitState {
    Editing,
    Sending,
    Sent,
}

/// A message is submittable once every field has visible content.
fn submission_ready(name: &str, email: &str, message: &str) -> bool {
    !name.trim().is_empty() && !email.trim().is_empty() && !message.trim().is_empty()
}

#[component]
pub fn ContactView() -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut submit_state = use_signal(|| SubmitState::Editing);

    let ready = submission_ready(&name(), &email(), &message());
    let sending = submit_state() == SubmitState::Sending;

    let on_submit = move |e: Event<FormData>| {
        e.prevent_default();
        if !submission_ready(&name.peek(), &email.peek(), &message.peek())
            || *submit_state.peek() != SubmitState::Editing
        {
            return;
        }
        submit_state.set(SubmitState::Sending);

        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(1500).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

            name.set(String::new());
            email.set(String::new());
            message.set(String::new());
            submit_state.set(SubmitState::Sent);
        });
    };

    rsx! {
        div { class: "contact-page",
            h1 { class: "page-title", "Contact Us" }

            div { class: "contact-card",
                div { class: "contact-card-header",
                    h2 { "Get in Touch" }
                    p {
                        "Have questions or feedback? Send us a message and we'll get \
                         back to you."
                    }
                }

                {match submit_state() {
                    SubmitState::Sent => rsx! {
                        div { class: "contact-sent",
                            h3 { "Thank You!" }
                            p { "Your message has been sent successfully." }
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| submit_state.set(SubmitState::Editing),
                                "Send Another Message"
                            }
                        }
                    },
                    _ => rsx! {
                        form { class: "contact-form", onsubmit: on_submit,
                            label { class: "contact-label", r#for: "contact-name", "Name" }
                            input {
                                id: "contact-name",
                                class: "contact-input",
                                value: name,
                                oninput: move |e| name.set(e.value()),
                            }

                            label { class: "contact-label", r#for: "contact-email", "Email" }
                            input {
                                id: "contact-email",
                                class: "contact-input",
                                r#type: "email",
                                value: email,
                                oninput: move |e| email.set(e.value()),
                            }

                            label { class: "contact-label", r#for: "contact-message", "Message" }
                            textarea {
                                id: "contact-message",
                                class: "contact-input contact-textarea",
                                rows: "5",
                                value: message,
                                oninput: move |e| message.set(e.value()),
                            }

                            button {
                                class: "btn btn-secondary contact-submit",
                                r#type: "submit",
                                disabled: sending || !ready,
                                if sending { "Sending..." } else { "Send Message" }
                            }
                        }
                    },
                }}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_requires_every_field() {
        assert!(submission_ready("Aisha", "aisha@example.com", "Salaam"));
        assert!(!submission_ready("", "aisha@example.com", "Salaam"));
        assert!(!submission_ready("Aisha", "", "Salaam"));
        assert!(!submission_ready("Aisha", "aisha@example.com", ""));
    }

    #[test]
    fn whitespace_only_fields_do_not_count() {
        assert!(!submission_ready("  ", "aisha@example.com", "Salaam"));
        assert!(!submission_ready("Aisha", "aisha@example.com", " \n "));
    }
}
