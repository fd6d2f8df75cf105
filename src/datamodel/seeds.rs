use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    Daily,
    Weekly,
    Monthly,
}

impl ChallengeType {
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChallengeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown challenge type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeedChallenge {
    pub name: &'static str,
    pub description: &'static str,
    pub challenge_type: ChallengeType,
    pub points_reward: i32,
}

pub const SEED_CHALLENGES: &[SeedChallenge] = &[
    SeedChallenge {
        name: "Early Bird",
        description: "Clock in before your scheduled start time",
        challenge_type: ChallengeType::Daily,
        points_reward: 10,
    },
    SeedChallenge {
        name: "Inbox Zero",
        description: "Close every task due today",
        challenge_type: ChallengeType::Daily,
        points_reward: 15,
    },
    SeedChallenge {
        name: "Task Crusher",
        description: "Complete ten tasks within the week",
        challenge_type: ChallengeType::Weekly,
        points_reward: 50,
    },
    SeedChallenge {
        name: "Team Player",
        description: "Help teammates in five chat threads",
        challenge_type: ChallengeType::Weekly,
        points_reward: 30,
    },
    SeedChallenge {
        name: "Perfect Attendance",
        description: "No missed or late clock-ins for the whole month",
        challenge_type: ChallengeType::Monthly,
        points_reward: 200,
    },
];

/// Natural key backing `ON CONFLICT (name)`.
pub const CHALLENGE_NAME_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS challenges_name_key ON challenges (name)";

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn seed_challenges_sql() -> String {
    let rows: Vec<String> = SEED_CHALLENGES
        .iter()
        .map(|c| {
            format!(
                "    ({}, {}, {}, {})",
                quote_literal(c.name),
                quote_literal(c.description),
                quote_literal(c.challenge_type.as_str()),
                c.points_reward
            )
        })
        .collect();

    format!(
        "INSERT INTO challenges (name, description, challenge_type, points_reward) VALUES\n{}\nON CONFLICT (name) DO NOTHING",
        rows.join(",\n")
    )
}
