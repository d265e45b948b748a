use super::*;

#[test]
fn constructors_tag_kind() {
    assert_eq!(Notice::success("ok").kind, NoticeKind::Success);
    assert_eq!(Notice::error("bad").kind, NoticeKind::Error);
    assert_eq!(Notice::error("bad").text, "bad");
}

#[test]
fn class_reflects_kind() {
    assert_eq!(Notice::success("ok").class(), "notice notice--success");
    assert_eq!(Notice::error("bad").class(), "notice notice--error");
}
