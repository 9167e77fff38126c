//! Route pattern compilation and matching.
//!
//! A pattern is a path made of literal text and `:name` parameters. A
//! parameter matches one or more characters up to the next `/`, so it never
//! spans segments. Patterns are anchored at both ends: `/product/:id/`
//! matches `/product/42/` but not `/product/42`.

/// Pattern registering the not-found handler.
pub const NOT_FOUND_PATTERN: &str = "*";

/// Pattern registering the catch-all route.
pub const CATCH_ALL_PATTERN: &str = ".*";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param,
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    kind: MatcherKind,
    param_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MatcherKind {
    Any,
    Tokens(Vec<Token>),
}

impl PathMatcher {
    /// Compile `pattern`.
    ///
    /// [`CATCH_ALL_PATTERN`] compiles to a matcher accepting every path.
    pub fn compile(pattern: &str) -> Self {
        if pattern == CATCH_ALL_PATTERN {
            return Self {
                kind: MatcherKind::Any,
                param_names: Vec::new(),
            };
        }

        let mut tokens = Vec::new();
        let mut param_names = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ':' && chars.peek().is_some_and(|next| is_word_char(*next)) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                while let Some(next) = chars.peek().copied().filter(|n| is_word_char(*n)) {
                    name.push(next);
                    chars.next();
                }
                param_names.push(name);
                tokens.push(Token::Param);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self {
            kind: MatcherKind::Tokens(tokens),
            param_names,
        }
    }

    /// Parameter names in the order they appear in the pattern.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Whether this matcher accepts every path.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.kind, MatcherKind::Any)
    }

    /// Match `path`, returning captured parameter values positionally.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        match &self.kind {
            MatcherKind::Any => Some(Vec::new()),
            MatcherKind::Tokens(tokens) => {
                let mut captures = Vec::with_capacity(self.param_names.len());
                match_tokens(tokens, path, &mut captures).then_some(captures)
            }
        }
    }

    /// Whether `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn match_tokens<'p>(tokens: &[Token], path: &'p str, captures: &mut Vec<&'p str>) -> bool {
    let Some((token, rest_tokens)) = tokens.split_first() else {
        return path.is_empty();
    };

    match token {
        Token::Literal(literal) => path
            .strip_prefix(literal.as_str())
            .is_some_and(|rest| match_tokens(rest_tokens, rest, captures)),
        Token::Param => {
            let segment_end = path.find('/').unwrap_or(path.len());
            // Longest capture first, then backtrack.
            let ends: Vec<usize> = path[..segment_end]
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect();
            for end in ends.into_iter().rev() {
                captures.push(&path[..end]);
                if match_tokens(rest_tokens, &path[end..], captures) {
                    return true;
                }
                captures.pop();
            }
            false
        }
    }
}
