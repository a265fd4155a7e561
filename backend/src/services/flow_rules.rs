use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Drop,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_dst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_proto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_dst: Option<u16>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FlowRule {
    pub priority: u16,
    pub action: RuleAction,
    #[serde(rename = "match")]
    pub matches: FlowMatch,
}

const ALLOW_PRIORITY: u16 = 200;
const DROP_PRIORITY: u16 = 100;

impl FlowRule {
    fn allow_tcp(port: u16) -> Self {
        Self {
            priority: ALLOW_PRIORITY,
            action: RuleAction::Allow,
            matches: FlowMatch { tcp_dst: Some(port), ..Default::default() },
        }
    }

    fn drop_from(subnet: &str) -> Self {
        Self {
            priority: DROP_PRIORITY,
            action: RuleAction::Drop,
            matches: FlowMatch {
                ipv4_src: Some(subnet.to_string()),
                ip_proto: Some("any".to_string()),
                ..Default::default()
            },
        }
    }

    fn drop_to(subnet: &str) -> Self {
        Self {
            priority: DROP_PRIORITY,
            action: RuleAction::Drop,
            matches: FlowMatch {
                ipv4_dst: Some(subnet.to_string()),
                ip_proto: Some("any".to_string()),
                ..Default::default()
            },
        }
    }
}

/// Canned OpenFlow rules for a security policy. Unknown policies get no rules.
pub fn generate_flow_rules(subnet: &str, policy: &str) -> Vec<FlowRule> {
    match policy {
        "default" => vec![FlowRule::drop_from(subnet), FlowRule::drop_to(subnet)],
        "web" => vec![
            FlowRule::allow_tcp(80),
            FlowRule::allow_tcp(443),
            FlowRule::drop_from(subnet),
        ],
        "database" => vec![
            FlowRule::allow_tcp(3306),
            FlowRule::allow_tcp(5432),
            FlowRule::drop_from(subnet),
        ],
        _ => Vec::new(),
    }
}
