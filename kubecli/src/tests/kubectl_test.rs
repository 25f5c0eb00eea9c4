use super::*;
use crate::kubectl::{
    set_namespace_args, unset_args, use_context_args, Section, SystemKubectl,
};

#[rstest]
#[case::clusters(Section::Clusters, "a", "clusters.a")]
#[case::contexts(Section::Contexts, "dev-east", "contexts.dev-east")]
#[case::users(Section::Users, "admin@k8s.example.com", "users.admin@k8s.example.com")]
#[case::leading_hyphen(Section::Users, "-odd", "users.-odd")]
fn test_unset_args(#[case] section: Section, #[case] name: &str, #[case] key: &str) {
    assert_eq!(unset_args(section, name), argv(&["config", "unset", key]));
}

#[rstest]
fn test_use_context_args() {
    assert_eq!(
        use_context_args("prod").unwrap(),
        argv(&["config", "use-context", "prod"])
    );
}

#[rstest]
fn test_use_context_args_rejects_flags() {
    let err = use_context_args("--kubeconfig=/etc/passwd").unwrap_err();

    assert!(matches!(err, KubectlError::FlagLike(name) if name == "--kubeconfig=/etc/passwd"));
}

#[rstest]
fn test_set_namespace_args() {
    assert_eq!(
        set_namespace_args("dev", "staging").unwrap(),
        argv(&["config", "set-context", "dev", "--namespace=staging"])
    );
}

#[rstest]
#[case::no_context("")]
#[case::flag_like("-n")]
fn test_set_namespace_args_rejected(#[case] context: &str) {
    let _ = set_namespace_args(context, "staging").unwrap_err();
}

#[rstest]
fn test_failed_error_message() {
    let err = KubectlError::Failed {
        program: "kubectl".into(),
        args: argv(&["config", "unset", "users.bob"]),
        status: "exit status: 1".into(),
        output: "error: boom".into(),
    };

    assert_eq!(
        err.to_string(),
        "kubectl config unset users.bob failed (exit status: 1): error: boom"
    );
}

#[rstest]
fn test_system_kubectl_spawn_failure() {
    let kubectl = SystemKubectl::new("kubecli-test-no-such-binary");

    let err = kubectl.run(&argv(&["config", "view"])).unwrap_err();

    assert!(matches!(err, KubectlError::Spawn { .. }));
}

#[cfg(unix)]
#[rstest]
fn test_system_kubectl_captures_combined_output() {
    let sh = SystemKubectl::new("sh");

    let out = sh.run(&argv(&["-c", "echo out; echo err >&2"])).unwrap();

    assert_eq!(out, "out\nerr\n");
}

#[cfg(unix)]
#[rstest]
fn test_system_kubectl_nonzero_exit() {
    let sh = SystemKubectl::new("sh");

    let err = sh.run(&argv(&["-c", "echo nope >&2; exit 3"])).unwrap_err();

    match err {
        KubectlError::Failed { output, args, .. } => {
            assert_eq!(output, "nope");
            assert_eq!(args, argv(&["-c", "echo nope >&2; exit 3"]));
        },
        other => panic!("unexpected error: {other}"),
    }
}
