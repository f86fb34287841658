//! Method signatures shared by interfaces and classes.

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A method signature: name, parameters and return type.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
    returns: String,
    doc: Option<String>,
}

impl Signature {
    pub fn new(name: impl Into<String>, returns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: returns.into(),
            doc: None,
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Attach a doc comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn doc_comment(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// `name(a: A, b: B): R`, without terminator.
    pub fn render(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({}): {}", self.name, params, self.returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_render() {
        let sig = Signature::new("findOne", "Promise<Post | null>").param(Param::new("slug", "string"));
        assert_eq!(sig.render(), "findOne(slug: string): Promise<Post | null>");
    }

    #[test]
    fn test_signature_without_params() {
        let sig = Signature::new("ping", "Promise<void>");
        assert_eq!(sig.render(), "ping(): Promise<void>");
    }
}
