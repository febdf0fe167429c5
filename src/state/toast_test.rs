use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastLevel::Error, "first");
    let b = state.push(ToastLevel::Success, "second");
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[0].message, "first");
    assert_eq!(state.toasts[1].level, ToastLevel::Success);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastLevel::Error, "first");
    let b = state.push(ToastLevel::Error, "second");
    state.dismiss(a);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].id, b);
}

#[test]
fn dismiss_unknown_id_is_noop() {
    let mut state = ToastState::default();
    state.push(ToastLevel::Error, "kept");
    state.dismiss(999);
    assert_eq!(state.toasts.len(), 1);
}
