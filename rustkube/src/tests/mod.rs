
use rstest::*;

use super::*;

const SCENARIO_CONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
preferences: {}
clusters:
- name: a
  cluster:
    server: https://a.example.com
    insecure-skip-tls-verify: true
- name: b
  cluster:
    server: https://b.example.com
    extensions:
    - name: client.authentication.k8s.io/exec
      extension: {}
- name: c
  cluster:
    server: https://c.example.com
users:
- name: alice
  user:
    token: abc123
- name: bob
  user:
    client-certificate-data: Zm9v
contexts:
- name: dev
  context: {cluster: a, user: alice, namespace: web}
- name: prod
  context: {cluster: b, user: bob, namespace: api}
- name: scratch
  context: {cluster: c, user: bob}
"#;

#[fixture]
fn kube_config() -> KubeConfig {
    KubeConfig::parse(SCENARIO_CONFIG.as_bytes()).unwrap()
}
