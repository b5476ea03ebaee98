use std::collections::{BTreeMap, BTreeSet};

use crate::dto::balance::{
    BalanceSuggestion, CandidateCompatibility, MmrStats, Recommendation, SuggestionKind, TeamBalance,
};
use crate::dto::user::UserSummary;
use crate::models::User;

/// Rating assumed for members who have not played yet
pub const DEFAULT_MMR: i32 = 1000;
pub const REQUIRED_ROLES: [&str; 3] = ["frontend", "backend", "designer"];

const MMR_SPREAD_TOLERANCE: i32 = 500;
const MAX_SPREAD_PENALTY: f64 = 30.0;
const MISSING_ROLE_PENALTY: f64 = 10.0;
const SKILL_DIVERSITY_BONUS: f64 = 10.0;
const FULL_TEAM_BONUS: f64 = 5.0;
const SMALL_TEAM_PENALTY: f64 = 20.0;
const RECOMMENDATION_MARGIN: f64 = 5.0;

/// Score a roster. Order of `members` does not affect the result.
pub fn score(members: &[User]) -> TeamBalance {
    let mut balance = TeamBalance::default();

    if members.is_empty() {
        balance.warnings.push("empty team".to_string());
        return balance;
    }

    let mmrs: Vec<i32> = members.iter().map(effective_mmr).collect();
    let min = mmrs.iter().copied().min().unwrap_or(DEFAULT_MMR);
    let max = mmrs.iter().copied().max().unwrap_or(DEFAULT_MMR);
    let total: i64 = mmrs.iter().map(|&m| i64::from(m)).sum();

    balance.mmr_stats = MmrStats {
        average: total as f64 / members.len() as f64,
        min,
        max,
        spread: max - min,
    };

    for member in members {
        for skill in &member.skills {
            *balance.skill_coverage.entry(skill.clone()).or_default() += 1;
        }
        for role in &member.looking_for {
            *balance.role_coverage.entry(role.clone()).or_default() += 1;
        }
    }

    let mut score = 100.0;

    if balance.mmr_stats.spread > MMR_SPREAD_TOLERANCE {
        let penalty = f64::from(balance.mmr_stats.spread - MMR_SPREAD_TOLERANCE) / 10.0;
        score -= penalty.min(MAX_SPREAD_PENALTY);
        balance.warnings.push("large skill level spread between members".to_string());
        balance.suggestions.push(BalanceSuggestion {
            kind: SuggestionKind::Mmr,
            message: "look for teammates with a similar MMR".to_string(),
        });
    }

    let missing: Vec<&str> = REQUIRED_ROLES
        .iter()
        .copied()
        .filter(|role| !balance.role_coverage.contains_key(*role))
        .collect();
    if !missing.is_empty() {
        score -= MISSING_ROLE_PENALTY * missing.len() as f64;
        balance.warnings.push("key roles are missing".to_string());
        for role in missing {
            balance.suggestions.push(BalanceSuggestion {
                kind: SuggestionKind::Role,
                message: format!("look for a {}", role_label(role)),
            });
        }
    }

    if balance.skill_coverage.len() >= 5 {
        score += SKILL_DIVERSITY_BONUS;
    }

    if members.len() >= 4 {
        score += FULL_TEAM_BONUS;
    }

    if members.len() < 2 {
        score -= SMALL_TEAM_PENALTY;
        balance.warnings.push("team is too small".to_string());
        balance.suggestions.push(BalanceSuggestion {
            kind: SuggestionKind::Team,
            message: "find more teammates by swiping".to_string(),
        });
    }

    balance.score = score.clamp(0.0, 100.0);
    balance
}

/// Marginal effect of adding `candidate` to `members`
pub fn compatibility(members: &[User], candidate: &User) -> CandidateCompatibility {
    let current = score(members);

    let mut with_candidate: Vec<User> = members.to_vec();
    if !with_candidate.iter().any(|m| m.user_id == candidate.user_id) {
        with_candidate.push(candidate.clone());
    }
    let new = score(&with_candidate);

    let score_diff = new.score - current.score;
    let recommendation = if score_diff > RECOMMENDATION_MARGIN {
        Recommendation::Recommended
    } else if score_diff < -RECOMMENDATION_MARGIN {
        Recommendation::NotRecommended
    } else {
        Recommendation::Neutral
    };

    CandidateCompatibility {
        candidate: UserSummary::from(candidate),
        current_balance: current.score,
        new_balance: new.score,
        score_diff,
        recommendation,
        new_skills_covered: count_uncovered(&current.skill_coverage, &candidate.skills),
        new_roles_covered: count_uncovered(&current.role_coverage, &candidate.looking_for),
    }
}

fn effective_mmr(user: &User) -> i32 {
    if user.mmr == 0 { DEFAULT_MMR } else { user.mmr }
}

fn count_uncovered(coverage: &BTreeMap<String, usize>, values: &[String]) -> usize {
    values
        .iter()
        .filter(|v| !coverage.contains_key(v.as_str()))
        .collect::<BTreeSet<_>>()
        .len()
}

fn role_label(role: &str) -> &str {
    match role {
        "frontend" => "frontend developer",
        "backend" => "backend developer",
        "designer" => "designer",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use uuid::Uuid;

    fn user(mmr: i32, skills: &[&str], roles: &[&str]) -> User {
        User {
            user_id: Uuid::new_v4(),
            telegram_user_id: None,
            username: "user".to_string(),
            name: "User".to_string(),
            bio: None,
            role: UserRole::User,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            looking_for: roles.iter().map(|s| s.to_string()).collect(),
            verified_skills: vec![],
            experience: None,
            mmr,
            pts: 0,
            avatar_url: None,
            current_hackathon_id: None,
            team_id: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_empty_team_scores_zero() {
        let balance = score(&[]);
        assert_eq!(balance.score, 0.0);
        assert_eq!(balance.warnings, vec!["empty team".to_string()]);
        assert!(balance.suggestions.is_empty());
    }

    #[test]
    fn test_single_member_without_roles() {
        // 100 - 3 * 10 missing roles - 20 small team
        let balance = score(&[user(1000, &["rust"], &[])]);
        assert_eq!(balance.score, 50.0);
        assert_eq!(balance.mmr_stats.spread, 0);

        let role_suggestions = balance
            .suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::Role)
            .count();
        assert_eq!(role_suggestions, 3);
        assert!(balance.warnings.contains(&"team is too small".to_string()));
    }

    #[test]
    fn test_balanced_full_team_is_clamped() {
        let members = vec![
            user(1000, &["react", "ts"], &["frontend"]),
            user(1100, &["rust", "sql"], &["backend"]),
            user(1050, &["figma"], &["designer"]),
            user(1020, &["python"], &["backend"]),
        ];
        // 100 + 10 skills + 5 size, clamped
        let balance = score(&members);
        assert_eq!(balance.score, 100.0);
        assert!(balance.warnings.is_empty());
        assert_eq!(balance.role_coverage.get("backend"), Some(&2));
    }

    #[test]
    fn test_spread_penalty_is_capped() {
        let roles = ["frontend", "backend", "designer"];
        let wide = score(&[user(800, &[], &roles), user(1600, &[], &roles)]);
        // spread 800 -> penalty 30 (cap)
        assert_eq!(wide.mmr_stats.spread, 800);
        assert_eq!(wide.score, 70.0);

        let narrow = score(&[user(1000, &[], &roles), user(1600, &[], &roles)]);
        // spread 600 -> penalty 10
        assert_eq!(narrow.score, 90.0);
        assert!(narrow.suggestions.iter().any(|s| s.kind == SuggestionKind::Mmr));
    }

    #[test]
    fn test_zero_mmr_counts_as_default() {
        let balance = score(&[user(0, &[], &[]), user(1000, &[], &[])]);
        assert_eq!(balance.mmr_stats.min, DEFAULT_MMR);
        assert_eq!(balance.mmr_stats.average, 1000.0);
    }

    #[test]
    fn test_score_is_order_independent() {
        let a = user(900, &["go", "k8s"], &["backend"]);
        let b = user(1700, &["figma"], &["designer"]);
        let c = user(1200, &["vue"], &["frontend", "designer"]);

        let forward = score(&[a.clone(), b.clone(), c.clone()]);
        let backward = score(&[c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_candidate_filling_roles_is_recommended() {
        let captain = user(1000, &["rust"], &["backend"]);
        let candidate = user(1050, &["react", "css"], &["frontend", "designer"]);

        let result = compatibility(&[captain], &candidate);
        // 100-20-20=60 -> 100 with two members and all roles
        assert_eq!(result.current_balance, 60.0);
        assert_eq!(result.new_balance, 100.0);
        assert_eq!(result.recommendation, Recommendation::Recommended);
        assert_eq!(result.new_skills_covered, 2);
        assert_eq!(result.new_roles_covered, 2);
    }

    #[test]
    fn test_candidate_widening_spread_is_not_recommended() {
        let roles = ["frontend", "backend", "designer"];
        let members = vec![user(1000, &["a"], &roles), user(1000, &["b"], &roles)];
        let candidate = user(2000, &["a"], &["backend"]);

        let result = compatibility(&members, &candidate);
        assert_eq!(result.score_diff, -30.0);
        assert_eq!(result.recommendation, Recommendation::NotRecommended);
        assert_eq!(result.new_skills_covered, 0);
    }

    #[test]
    fn test_existing_member_as_candidate_is_neutral() {
        let member = user(1000, &["a"], &["frontend"]);
        let result = compatibility(&[member.clone()], &member);
        assert_eq!(result.score_diff, 0.0);
        assert_eq!(result.recommendation, Recommendation::Neutral);
    }
}
