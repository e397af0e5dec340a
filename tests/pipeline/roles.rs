use insider_collective::Role;
use insider_collective::normalize::{ROLE_RULES, classify};

#[test]
fn rule_order_decides_multi_role_relationships() {
    let cases = [
        ("Chief Executive Officer and Director", Role::Ceo),
        ("Director, President & CEO", Role::Ceo),
        ("President and CFO", Role::Cfo),
        ("Chief Financial Officer", Role::Cfo),
        ("Director and 10% Owner", Role::Director),
        ("Chief Operating Officer, Director", Role::OtherCLevel),
    ];
    for (text, want) in cases {
        assert_eq!(classify(text), want, "{text:?}");
    }
}

#[test]
fn single_role_relationships() {
    let cases = [
        ("CEO", Role::Ceo),
        ("ceo", Role::Ceo),
        ("CFO", Role::Cfo),
        ("COO", Role::OtherCLevel),
        ("CTO", Role::OtherCLevel),
        ("Director", Role::Director),
        ("President", Role::President),
        ("10% Owner", Role::TenPercentOwner),
        ("Executive Vice President", Role::ExecutiveVp),
        ("Senior Vice President", Role::ExecutiveVp),
        ("EVP, General Counsel", Role::ExecutiveVp),
        ("SVP", Role::ExecutiveVp),
        ("Sr. VP Finance", Role::ExecutiveVp),
        ("Sr. Vice President", Role::ExecutiveVp),
        ("Sr Vice President, Operations", Role::ExecutiveVp),
        ("Executive VP", Role::ExecutiveVp),
    ];
    for (text, want) in cases {
        assert_eq!(classify(text), want, "{text:?}");
    }
}

#[test]
fn unmatched_relationships_fall_back_to_other() {
    for text in ["", "Beneficial Owner", "Co-Founder", "Secretary"] {
        assert_eq!(classify(text), Role::Other, "{text:?}");
    }
}

#[test]
fn table_covers_every_role_but_other() {
    let mut covered: Vec<Role> = ROLE_RULES.iter().map(|(_, r)| *r).collect();
    covered.push(Role::Other);
    for role in Role::ALL {
        assert!(covered.contains(&role), "{role} has no rule");
    }
    assert_eq!(Role::ExecutiveVp.to_string(), "Executive/Senior VP");
}

#[test]
fn other_vice_presidents_count_as_president() {
    for text in [
        "Vice President",
        "Group Vice President",
        "Vice President & Treasurer",
        "Vice-President, Sales",
    ] {
        assert_eq!(classify(text), Role::President, "{text:?}");
    }
}
