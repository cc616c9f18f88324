use std::fmt;
use std::str::FromStr;

/// Rôle applicatif dérivé des groupes du fournisseur d'identité
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Lawyer,
    Client,
}

impl Role {
    /// Ordre de priorité des redirections.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Lawyer, Role::Client];

    /// Nom du groupe côté fournisseur d'identité.
    pub fn group(self) -> &'static str {
        match self {
            Role::Admin => "admins",
            Role::Lawyer => "lawyers",
            Role::Client => "clients",
        }
    }

    /// Page d'accueil du rôle.
    pub fn home(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Lawyer => "/lawyer",
            Role::Client => "/client",
        }
    }

    pub fn from_group(group: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.group() == group)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "admins" => Ok(Role::Admin),
            "lawyer" | "lawyers" => Ok(Role::Lawyer),
            "client" | "clients" => Ok(Role::Client),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::Lawyer => "lawyer",
            Role::Client => "client",
        })
    }
}

/// Rôles reconnus parmi les groupes ; les groupes inconnus sont ignorés.
pub fn roles_from_groups<S: AsRef<str>>(groups: &[S]) -> Vec<Role> {
    groups
        .iter()
        .filter_map(|g| Role::from_group(g.as_ref()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(&'static str),
}

/// Accès accordé si un des rôles autorisés est détenu, sinon redirection
/// vers la page du rôle le plus élevé (admin, avocat, client, puis `/`).
pub fn authorize<S: AsRef<str>>(groups: &[S], allowed: &[Role]) -> Access {
    let held = roles_from_groups(groups);
    if allowed.iter().any(|r| held.contains(r)) {
        return Access::Granted;
    }
    let target = Role::ALL
        .into_iter()
        .find(|r| held.contains(r))
        .map(Role::home)
        .unwrap_or("/");
    tracing::debug!(?held, redirect = target, "access redirected");
    Access::Redirect(target)
}
