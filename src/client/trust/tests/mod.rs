mod support;

use crate::{
    client::{
        error::{ContactsError, RemoteError, TrustError},
        presentation::{NoticeLevel, ViewMode},
        registry::{Identity, StaticIdentityRegistry},
    },
    model::trust::{EntityKind, ListKey, TrustListsDto, TrustState},
};

use self::support::*;

use super::*;
