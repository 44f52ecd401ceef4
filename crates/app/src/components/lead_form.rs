use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdPhoneCall;
use dioxus_free_icons::Icon;
use shared_types::{
    catalog_labels, AppError, CallOutcome, CarModel, LeadCallForm, LeadField, Notice, NoticeLevel,
    SubmissionState,
};
use shared_ui::{use_toast, Button, ButtonVariant, Form, FormField, Input, MultiSelect, Textarea};
use std::collections::HashMap;

use crate::notify;

/// What the form shows once an attempt has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub notice: Notice,
    pub field_errors: HashMap<String, String>,
    pub succeeded: bool,
}

/// Turn the server function result into a notice plus any field errors.
///
/// Structured errors (validation, conflict, rate limit) keep their own
/// message; anything else reads as a generic submission failure.
pub fn settle(result: Result<CallOutcome, ServerFnError>) -> Settlement {
    match result {
        Ok(outcome) => Settlement {
            notice: outcome.notice(),
            field_errors: HashMap::new(),
            succeeded: outcome.is_success(),
        },
        Err(e) => {
            let raw = e.to_string();
            Settlement {
                notice: Notice {
                    level: NoticeLevel::Error,
                    text: AppError::friendly_message(&raw),
                },
                field_errors: AppError::parse_field_errors(&raw),
                succeeded: false,
            }
        }
    }
}

fn field_error(errors: &HashMap<String, String>, field: LeadField) -> String {
    errors.get(field.as_str()).cloned().unwrap_or_default()
}

/// Lead capture form. Validates locally, then asks the server to call.
#[component]
pub fn LeadForm() -> Element {
    let toast = use_toast();

    let mut form = use_signal(LeadCallForm::new_session);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut state = use_signal(SubmissionState::default);

    let handle_submit = move |_: FormEvent| {
        if state.read().is_busy() {
            return;
        }
        let request = match form.read().validate_form() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e.field_errors);
                return;
            }
        };
        if state.write().begin().is_err() {
            return;
        }
        errors.set(HashMap::new());

        spawn(async move {
            let settlement = settle(server::api::initiate_call(request.into_form()).await);
            errors.set(settlement.field_errors.clone());
            if settlement.succeeded {
                form.set(LeadCallForm::new_session());
            }
            state.write().settle(settlement.succeeded);
            notify::show(&toast, &settlement.notice);
        });
    };

    let busy = state.read().is_busy();
    let current = form.read().clone();
    let field_errors = errors.read().clone();

    rsx! {
        Form { onsubmit: handle_submit,
            FormField {
                label: "Contact name",
                html_for: LeadField::ContactName.as_str(),
                description: "Who should the agent ask for?",
                error: field_error(&field_errors, LeadField::ContactName),
                Input {
                    id: LeadField::ContactName.as_str(),
                    value: current.contact_name.clone(),
                    placeholder: "Mr. Raghav Kumar",
                    disabled: busy,
                    invalid: field_errors.contains_key(LeadField::ContactName.as_str()),
                    on_input: move |evt: FormEvent| form.write().contact_name = evt.value(),
                }
            }
            FormField {
                label: "Phone number",
                html_for: LeadField::PhoneNumber.as_str(),
                description: "Numbers without a country code are treated as Indian (+91).",
                error: field_error(&field_errors, LeadField::PhoneNumber),
                Input {
                    id: LeadField::PhoneNumber.as_str(),
                    input_type: "tel",
                    value: current.phone_number.clone(),
                    placeholder: "+91 63019 79823",
                    disabled: busy,
                    invalid: field_errors.contains_key(LeadField::PhoneNumber.as_str()),
                    on_input: move |evt: FormEvent| form.write().phone_number = evt.value(),
                }
            }
            FormField {
                label: "Car models",
                html_for: LeadField::CarModels.as_str(),
                description: "The models the customer is interested in.",
                error: field_error(&field_errors, LeadField::CarModels),
                MultiSelect {
                    id: LeadField::CarModels.as_str(),
                    options: catalog_labels(),
                    selected: current.car_models.clone(),
                    placeholder: "Select car models",
                    disabled: busy,
                    invalid: field_errors.contains_key(LeadField::CarModels.as_str()),
                    on_toggle: move |label: String| {
                        if let Some(model) = CarModel::from_label(&label) {
                            form.write().toggle_car_model(model);
                        }
                    },
                }
            }
            FormField {
                label: "Notes",
                html_for: LeadField::Notes.as_str(),
                description: "Anything the agent should mention on the call.",
                error: field_error(&field_errors, LeadField::Notes),
                Textarea {
                    id: LeadField::Notes.as_str(),
                    value: current.notes.clone(),
                    placeholder: "Discuss pricing options next week",
                    disabled: busy,
                    on_input: move |evt: FormEvent| form.write().notes = evt.value(),
                }
            }
            FormField {
                label: "Preferred time",
                html_for: LeadField::PreferredTime.as_str(),
                description: "When the customer would like to be called.",
                error: field_error(&field_errors, LeadField::PreferredTime),
                Input {
                    id: LeadField::PreferredTime.as_str(),
                    input_type: "datetime-local",
                    value: current.preferred_time.clone(),
                    disabled: busy,
                    invalid: field_errors.contains_key(LeadField::PreferredTime.as_str()),
                    on_input: move |evt: FormEvent| form.write().preferred_time = evt.value(),
                }
            }
            Button {
                variant: ButtonVariant::Primary,
                button_type: "submit",
                busy: busy,
                Icon { icon: LdPhoneCall, width: 16, height: 16 }
                if busy { "Initiating call\u{2026}" } else { "Call me" }
            }
        }
    }
}
