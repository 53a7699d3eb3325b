mod contact;
mod newsletter;
