use crate::{
    serialize_form, split_topics, validate, Effect, Msg, Phase, RpcFailure, RpcMethod, RpcReply,
    WidgetKind, WidgetState,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// At most one `Effect::CallRpc` is returned per message, and the next one is
/// only produced once the previous call's outcome comes back as a message.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match msg {
        Msg::Triggered(form) => {
            // The lock is the only guard against a second submission.
            if state.is_locked() {
                return (state, Vec::new());
            }
            state.begin_submission();

            let request = serialize_form(&form);
            if let Err(failure) = validate(&form, &request) {
                state.reject(&failure);
                return (state, Vec::new());
            }

            match state.kind() {
                WidgetKind::Excel => {
                    state.start_single();
                    vec![Effect::CallRpc {
                        method: WidgetKind::Excel.method(),
                        request,
                    }]
                }
                WidgetKind::Pdf => {
                    let topics = split_topics(request.topic().unwrap_or_default());
                    state.start_queue(request, topics);
                    drain_step(&mut state)
                }
            }
        }
        Msg::RpcSucceeded(reply) => match state.phase() {
            Phase::Draining { .. } => drain_step(&mut state),
            Phase::Submitting | Phase::Joining => finish_success(&mut state, reply),
            Phase::Idle | Phase::Done | Phase::Failed => Vec::new(),
        },
        Msg::RpcFailed(failure) => match state.phase() {
            Phase::Draining { .. } => {
                // Queue items surface the raw transport content when there is one.
                let text = failure
                    .content
                    .as_deref()
                    .filter(|content| !content.is_empty())
                    .unwrap_or(&failure.message)
                    .to_string();
                finish_failure(&mut state, &text, failure)
            }
            Phase::Submitting | Phase::Joining => {
                let text = failure.message.clone();
                finish_failure(&mut state, &text, failure)
            }
            Phase::Idle | Phase::Done | Phase::Failed => Vec::new(),
        },
    };

    (state, effects)
}

fn drain_step(state: &mut WidgetState) -> Vec<Effect> {
    if let Some((_dispatch, request)) = state.advance_queue() {
        return vec![Effect::CallRpc {
            method: RpcMethod::Pdf,
            request,
        }];
    }
    match state.start_join() {
        Some(request) => vec![Effect::CallRpc {
            method: RpcMethod::Pdf,
            request,
        }],
        None => Vec::new(),
    }
}

fn finish_success(state: &mut WidgetState, reply: RpcReply) -> Vec<Effect> {
    // Unlock before navigating away.
    state.succeed();
    match reply.redirect_url {
        Some(url) => vec![Effect::Navigate { url }],
        None => Vec::new(),
    }
}

fn finish_failure(state: &mut WidgetState, text: &str, failure: RpcFailure) -> Vec<Effect> {
    state.fail(text);
    vec![Effect::ReportFailure {
        code: failure.code,
        message: failure.message,
    }]
}
